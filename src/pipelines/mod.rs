//! Sub-renderers driven by the orchestrator.
//!
//! - `entity` draws the batched entities with the entity shader
//! - `terrain` draws terrain tiles with the terrain shader
//! - `shadow` renders the depth-only shadow map from the sun's point of view
//!
//! All of them issue the actual draw calls; the orchestrator only decides
//! when they run and with which inputs.

pub mod entity;
pub mod shadow;
pub mod terrain;
