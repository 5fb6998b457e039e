//! Subtitle Sync Module
//!
//! The orchestrator and the view model it produces.

mod engine;
mod view;

pub use engine::SubtitleSyncEngine;
pub use view::{HighlightAppearance, RenderViewModel, TextAppearance};
