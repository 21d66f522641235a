//! Renderer configuration.
//!
//! [`RendererConfig`] carries everything the orchestrator needs to know before
//! the first frame: the projection parameters, the colour the frame is cleared
//! to and where the shadow map is bound. Fields are public so the embedding
//! application can tweak them directly, the `with_*` helpers exist for
//! builder-style construction.

use cgmath::Deg;

/// Texture unit the shadow depth texture is bound to during a frame.
pub const SHADOW_TEXTURE_UNIT: u32 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct RendererConfig {
    /// Vertical field of view.
    pub fov: Deg<f32>,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Clear colour, also fed to the shaders for distance fog.
    pub sky_colour: wgpu::Color,
    pub shadow_texture_unit: u32,
    /// Face culled while culling is enabled.
    pub cull_face: wgpu::Face,
}

impl RendererConfig {
    pub fn with_fov(mut self, fov: impl Into<Deg<f32>>) -> Self {
        self.fov = fov.into();
        self
    }

    pub fn with_planes(mut self, near_plane: f32, far_plane: f32) -> Self {
        self.near_plane = near_plane;
        self.far_plane = far_plane;
        self
    }

    pub fn with_sky_colour(mut self, sky_colour: wgpu::Color) -> Self {
        self.sky_colour = sky_colour;
        self
    }

    pub fn with_shadow_texture_unit(mut self, unit: u32) -> Self {
        self.shadow_texture_unit = unit;
        self
    }

    pub fn with_cull_face(mut self, face: wgpu::Face) -> Self {
        self.cull_face = face;
        self
    }

    /// The sky colour as the three floats shaders expect.
    pub fn sky_rgb(&self) -> [f32; 3] {
        [
            self.sky_colour.r as f32,
            self.sky_colour.g as f32,
            self.sky_colour.b as f32,
        ]
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            fov: Deg(50.0),
            near_plane: 0.1,
            far_plane: 1000.0,
            sky_colour: wgpu::Color {
                r: 0.0,
                g: 0.3,
                b: 0.5,
                a: 1.0,
            },
            shadow_texture_unit: SHADOW_TEXTURE_UNIT,
            cull_face: wgpu::Face::Back,
        }
    }
}
