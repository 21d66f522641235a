//! Errors raised by the frame orchestration layer.
//!
//! Collaborators (shaders, sub-renderers, the shadow renderer) report failures
//! as [`anyhow::Error`]; those are wrapped here so callers can tell a broken
//! configuration apart from a failed pass.

use thiserror::Error;

use crate::render::FrameState;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    /// The viewport has no area, so no aspect ratio can be derived.
    #[error("invalid viewport {width}x{height}: width and height must be non-zero")]
    InvalidViewport { width: u32, height: u32 },

    /// Near and far plane coincide.
    #[error("degenerate frustum: near plane {near} equals far plane {far}")]
    DegenerateFrustum { near: f32, far: f32 },

    #[error("projection matrix contains non-finite entries")]
    NonFiniteProjection,

    /// Work was submitted while a frame was in flight.
    #[error("renderer is busy in state {state:?}; submissions are only accepted while idle")]
    Busy { state: FrameState },

    #[error("renderer has been cleaned up")]
    Released,

    /// Shader or sub-renderer creation failed.
    #[error("failed to construct renderer")]
    Construction(#[source] anyhow::Error),

    /// A sub-renderer failed; the frame was dropped.
    #[error("{pass} pass failed")]
    Pass {
        pass: &'static str,
        #[source]
        source: anyhow::Error,
    },
}
