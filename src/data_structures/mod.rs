//! Scene data handed to the renderer each frame.
//!
//! - `instance` holds per-instance transformation data
//! - `entity` pairs an instance with the model it is drawn with
//! - `terrain` is a single terrain tile
//! - `light` is the sun and its GPU uniform layout

pub mod entity;
pub mod instance;
pub mod light;
pub mod terrain;
