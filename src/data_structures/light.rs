//! The sun and its uniform layout.

use cgmath::Vector3;

/// Point light supplied by the scene each frame. The renderer only reads it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vector3<f32>,
    pub colour: Vector3<f32>,
}

impl Light {
    pub fn new(position: impl Into<Vector3<f32>>, colour: impl Into<Vector3<f32>>) -> Self {
        Self {
            position: position.into(),
            colour: colour.into(),
        }
    }

    pub fn to_uniform(&self) -> LightUniform {
        LightUniform {
            position: self.position.into(),
            _padding: 0,
            colour: self.colour.into(),
            _padding2: 0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
    pub colour: [f32; 3],
    _padding2: u32,
}
