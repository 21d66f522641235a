//! Graphics context state touched by the orchestrator.
//!
//! Depth testing, clearing, texture unit bindings and face culling are global
//! state in immediate-mode APIs. Here they go through an explicit
//! [`GraphicsContext`] handle instead, so no hidden global is mutated.
//! [`PassState`] is the wgpu flavour: it records what was requested and turns
//! it into the descriptors wgpu wants at pipeline and render pass creation.

use std::collections::BTreeMap;

/// Opaque handle of a texture owned by some backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

pub trait GraphicsContext {
    fn enable_depth_test(&mut self);
    /// Clears colour and depth; colour is set to `colour`.
    fn clear(&mut self, colour: wgpu::Color);
    fn bind_texture(&mut self, unit: u32, texture: TextureId);
    /// `None` disables culling.
    fn set_cull_mode(&mut self, cull_mode: Option<wgpu::Face>);
}

/// Standard depth buffer format (32-bit float).
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[derive(Clone, Debug)]
pub struct PassState {
    depth_test: bool,
    cull_mode: Option<wgpu::Face>,
    pending_clear: Option<wgpu::Color>,
    textures: BTreeMap<u32, TextureId>,
}

impl PassState {
    pub fn new() -> Self {
        Self {
            depth_test: false,
            cull_mode: None,
            pending_clear: None,
            textures: BTreeMap::new(),
        }
    }

    pub fn depth_test(&self) -> bool {
        self.depth_test
    }

    pub fn cull_mode(&self) -> Option<wgpu::Face> {
        self.cull_mode
    }

    pub fn bound_texture(&self, unit: u32) -> Option<TextureId> {
        self.textures.get(&unit).copied()
    }

    pub fn primitive_state(&self) -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: self.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        }
    }

    /// Depth state for pipelines; `None` while the depth test is off.
    pub fn depth_stencil(&self) -> Option<wgpu::DepthStencilState> {
        self.depth_test.then(|| wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: Some(true),
            depth_compare: Some(wgpu::CompareFunction::Less),
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        })
    }

    /// Colour attachment operations for the next render pass. Does not
    /// consume a pending clear; see [`begin_pass`](Self::begin_pass).
    pub fn colour_ops(&self) -> wgpu::Operations<wgpu::Color> {
        let load = match self.pending_clear {
            Some(colour) => wgpu::LoadOp::Clear(colour),
            None => wgpu::LoadOp::Load,
        };
        wgpu::Operations {
            load,
            store: wgpu::StoreOp::Store,
        }
    }

    pub fn depth_ops(&self) -> wgpu::Operations<f32> {
        let load = if self.pending_clear.is_some() {
            wgpu::LoadOp::Clear(1.0)
        } else {
            wgpu::LoadOp::Load
        };
        wgpu::Operations {
            load,
            store: wgpu::StoreOp::Store,
        }
    }

    /// Colour and depth operations for a render pass that is about to begin.
    ///
    /// A requested clear applies to both attachments of this pass and is
    /// consumed; later passes in the same frame load what is already there.
    pub fn begin_pass(&mut self) -> (wgpu::Operations<wgpu::Color>, wgpu::Operations<f32>) {
        let ops = (self.colour_ops(), self.depth_ops());
        self.pending_clear = None;
        ops
    }
}

impl Default for PassState {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsContext for PassState {
    fn enable_depth_test(&mut self) {
        self.depth_test = true;
    }

    fn clear(&mut self, colour: wgpu::Color) {
        self.pending_clear = Some(colour);
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureId) {
        self.textures.insert(unit, texture);
    }

    fn set_cull_mode(&mut self, cull_mode: Option<wgpu::Face>) {
        self.cull_mode = cull_mode;
    }
}
