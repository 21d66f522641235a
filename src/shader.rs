//! Shader programs as seen by the orchestrator.
//!
//! Compilation and uniform storage belong to the backend. The orchestrator
//! only starts and stops programs and pushes the per-frame values listed in
//! [`FrameUniforms`].

use cgmath::Matrix4;

use crate::{
    camera::Camera,
    data_structures::light::{Light, LightUniform},
};

pub trait ShaderProgram {
    /// Makes this program the active one.
    fn start(&mut self);
    fn stop(&mut self);

    fn load_projection_matrix(&mut self, projection: &Matrix4<f32>);
    fn load_sky_colour(&mut self, rgb: [f32; 3]);
    fn load_light(&mut self, light: &Light);
    fn load_view_matrix(&mut self, camera: &Camera);
    /// Distance from the camera at which shadows have fully faded out.
    fn load_shadow_distance(&mut self, distance: f32);
    /// Edge length of the shadow map in texels.
    fn load_shadow_map_size(&mut self, size: u32);

    /// Releases the GPU program. Called exactly once by the owner.
    fn clean_up(&mut self);

    fn load_frame_uniforms(&mut self, uniforms: &FrameUniforms) {
        self.load_sky_colour(uniforms.sky_colour);
        self.load_light(&uniforms.light);
        self.load_view_matrix(&uniforms.camera);
        self.load_shadow_distance(uniforms.shadow_distance);
        self.load_shadow_map_size(uniforms.shadow_map_size);
    }
}

/// Everything a pass shader receives once per frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameUniforms {
    pub sky_colour: [f32; 3],
    pub light: Light,
    pub camera: Camera,
    pub shadow_distance: f32,
    pub shadow_map_size: u32,
}

impl FrameUniforms {
    pub fn to_raw(&self) -> FrameUniformsRaw {
        FrameUniformsRaw {
            view: self.camera.view_matrix().into(),
            light: self.light.to_uniform(),
            sky_colour: self.sky_colour,
            shadow_distance: self.shadow_distance,
            shadow_map_size: self.shadow_map_size,
            _padding: [0; 3],
        }
    }
}

/// [`FrameUniforms`] laid out for a single uniform buffer write.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniformsRaw {
    pub view: [[f32; 4]; 4],
    pub light: LightUniform,
    pub sky_colour: [f32; 3],
    pub shadow_distance: f32,
    pub shadow_map_size: u32,
    _padding: [u32; 3],
}
