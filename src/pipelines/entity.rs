use cgmath::Matrix4;

use crate::{batch::EntityBatches, shader::ShaderProgram};

/// Draws batched entities. The shader is already started and carries the
/// per-frame uniforms when [`render`](Self::render) is called.
pub trait EntityRenderer {
    type Shader: ShaderProgram;

    fn render(
        &mut self,
        shader: &mut Self::Shader,
        batches: &EntityBatches,
        to_shadow_space: &Matrix4<f32>,
    ) -> anyhow::Result<()>;
}
