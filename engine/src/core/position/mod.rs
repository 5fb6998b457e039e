//! Subtitle Positioning
//!
//! Anchor-token resolution and the pointer-driven drag controller.

mod anchor;
mod controller;

pub use anchor::{
    resolve_position, AnchorToken, ResolvedPosition, TextAlignment, VerticalAnchor,
    CUSTOM_POSITION_TOKEN,
};
pub use controller::{
    percent_to_pointer, pointer_to_percent, DragState, DragUpdate, PercentPosition,
    PositionController, SurfaceLayout,
};
