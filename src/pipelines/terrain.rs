use cgmath::Matrix4;

use crate::{data_structures::terrain::Terrain, shader::ShaderProgram};

/// Draws terrain tiles. Counterpart of [`EntityRenderer`](super::entity::EntityRenderer).
pub trait TerrainRenderer {
    type Shader: ShaderProgram;

    fn render(
        &mut self,
        shader: &mut Self::Shader,
        terrains: &[Terrain],
        to_shadow_space: &Matrix4<f32>,
    ) -> anyhow::Result<()>;
}
