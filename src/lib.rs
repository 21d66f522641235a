//! flow-render
//!
//! Frame orchestration for a forward renderer with shadow mapping. The crate
//! batches entities by model, keeps the projection up to date and sequences
//! each frame: clear, shadow map binding, entity pass, terrain pass. The
//! actual draw calls are issued by shaders and sub-renderers the embedding
//! application plugs in through traits.
//!
//! High-level modules
//! - `batch`: per-frame grouping of entities by model, terrain collection
//! - `camera`: camera, viewport and the perspective projection
//! - `config`: renderer configuration (projection, sky colour, shadow unit)
//! - `context`: graphics context state (depth, clear, textures, culling)
//! - `data_structures`: entities, instances, terrain tiles and lights
//! - `error`: crate error type
//! - `pipelines`: entity, terrain and shadow map renderer traits
//! - `render`: the [`MasterRenderer`](render::MasterRenderer) frame orchestrator
//! - `shader`: shader program trait and per-frame uniforms
//!

pub mod batch;
pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod pipelines;
pub mod render;
pub mod shader;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use wgpu;
pub use winit::dpi::PhysicalSize;

pub use error::{RenderError, Result};
pub use render::{FrameState, MasterRenderer, RenderParts};
