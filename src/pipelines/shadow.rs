//! Shadow map production.

use cgmath::Matrix4;

use crate::{
    batch::EntityBatches,
    context::TextureId,
    data_structures::{light::Light, terrain::Terrain},
};

/// Renders scene depth from the light into a texture the main passes sample.
pub trait ShadowMapRenderer {
    /// Fills the shadow map and updates [`to_shadow_map_space`](Self::to_shadow_map_space).
    fn render(
        &mut self,
        batches: &EntityBatches,
        terrains: &[Terrain],
        sun: &Light,
    ) -> anyhow::Result<()>;

    /// Distance from the camera up to which shadows are drawn.
    fn shadow_distance(&self) -> f32;

    fn shadow_map_size(&self) -> u32;

    /// World space to shadow map texture space, valid after the last `render`.
    fn to_shadow_map_space(&self) -> Matrix4<f32>;

    fn shadow_map(&self) -> TextureId;

    fn clean_up(&mut self);
}
