//! Subcue Core Engine
//!
//! Core preview module.
//! Handles segment lookup, word timing, text layout, font scaling and positioning.

pub mod captions;
pub mod fs;
pub mod playback;
pub mod position;
pub mod render;
pub mod settings;
pub mod sync;
pub mod text;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;
