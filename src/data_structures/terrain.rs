use crate::data_structures::entity::ModelId;

/// World space edge length of one terrain tile.
pub const TILE_SIZE: f32 = 800.0;

/// One square terrain tile placed on the tile grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Terrain {
    pub x: f32,
    pub z: f32,
    pub model: ModelId,
}

impl Terrain {
    pub fn new(grid_x: i32, grid_z: i32, model: ModelId) -> Self {
        Self {
            x: grid_x as f32 * TILE_SIZE,
            z: grid_z as f32 * TILE_SIZE,
            model,
        }
    }

    /// Translation of the tile's origin corner.
    pub fn transform(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(cgmath::Vector3::new(self.x, 0.0, self.z))
    }
}
