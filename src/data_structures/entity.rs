//! Drawable entities and the handles they are batched by.

use crate::data_structures::instance::Instance;

/// Stable handle of a model (geometry plus material) owned by the asset side.
///
/// Many entities share one model; the renderer groups them by this handle so
/// the model's state is bound once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub u32);

/// A placed copy of a model.
#[derive(Clone, Debug)]
pub struct Entity {
    pub model: ModelId,
    pub instance: Instance,
}

impl Entity {
    pub fn new(model: ModelId, instance: Instance) -> Self {
        Self { model, instance }
    }

    /// Entity at `position` with no rotation and unit scale.
    pub fn at(model: ModelId, position: cgmath::Vector3<f32>) -> Self {
        Self::new(model, Instance::from(position))
    }
}
