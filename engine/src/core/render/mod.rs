//! Subtitle Rendering
//!
//! The font scaling model shared by preview and burn-in, and the burn-in
//! script generator built on it.

pub mod ass;
mod font_scale;

pub use ass::{build_ass_script, format_ass_timestamp, hex_to_ass_color};
pub use font_scale::*;
