//! Per-frame batching of entities by model.
//!
//! Entities are grouped by their [`ModelId`] so each model's geometry and
//! material are bound once per pass regardless of how many copies are drawn.
//! Batches live in a flat arena indexed through a handle map, which keeps
//! iteration order stable (first submission of a model wins) and avoids any
//! identity-based hashing.
//!
//! Batches never outlive a frame. [`EntityBatcher::drain_batches`] hands out
//! everything collected so far and leaves an empty batcher behind.

use std::collections::HashMap;

use crate::data_structures::{
    entity::{Entity, ModelId},
    terrain::Terrain,
};

/// All entities of one model in submission order.
#[derive(Clone, Debug)]
pub struct Batch {
    model: ModelId,
    entities: Vec<Entity>,
}

impl Batch {
    pub fn model(&self) -> ModelId {
        self.model
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Mapping from model to the entities drawn with it.
#[derive(Clone, Debug, Default)]
pub struct EntityBatches {
    index: HashMap<ModelId, usize>,
    batches: Vec<Batch>,
}

impl EntityBatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: Entity) {
        match self.index.get(&entity.model) {
            Some(&slot) => self.batches[slot].entities.push(entity),
            None => {
                self.index.insert(entity.model, self.batches.len());
                self.batches.push(Batch {
                    model: entity.model,
                    entities: vec![entity],
                });
            }
        }
    }

    pub fn get(&self, model: ModelId) -> Option<&Batch> {
        self.index.get(&model).map(|&slot| &self.batches[slot])
    }

    /// Batches in the order their model was first submitted.
    pub fn iter(&self) -> std::slice::Iter<'_, Batch> {
        self.batches.iter()
    }

    /// Number of distinct models.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Number of entities across all batches.
    pub fn instance_count(&self) -> usize {
        self.batches.iter().map(Batch::len).sum()
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.batches.clear();
    }
}

impl<'a> IntoIterator for &'a EntityBatches {
    type Item = &'a Batch;
    type IntoIter = std::slice::Iter<'a, Batch>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Entity> for EntityBatches {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut batches = Self::new();
        iter.into_iter().for_each(|entity| batches.push(entity));
        batches
    }
}

/// Collects the entities and terrain tiles of the frame being built.
#[derive(Debug, Default)]
pub struct EntityBatcher {
    batches: EntityBatches,
    terrains: Vec<Terrain>,
}

impl EntityBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit_entity(&mut self, entity: Entity) {
        self.batches.push(entity);
    }

    pub fn submit_terrain(&mut self, terrain: Terrain) {
        self.terrains.push(terrain);
    }

    /// Takes every batch collected so far; the batcher is empty afterwards.
    pub fn drain_batches(&mut self) -> EntityBatches {
        std::mem::take(&mut self.batches)
    }

    pub fn drain_terrains(&mut self) -> Vec<Terrain> {
        std::mem::take(&mut self.terrains)
    }

    pub fn batches(&self) -> &EntityBatches {
        &self.batches
    }

    pub fn terrains(&self) -> &[Terrain] {
        &self.terrains
    }

    pub fn instance_count(&self) -> usize {
        self.batches.instance_count()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty() && self.terrains.is_empty()
    }

    pub fn clear(&mut self) {
        self.batches.clear();
        self.terrains.clear();
    }
}
