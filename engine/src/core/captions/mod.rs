//! Caption Data Module
//!
//! Provides the subtitle data shared by the preview and burn-in paths:
//! - Timed segments (`Segment`) as produced by transcription
//! - The style configuration (`StyleConfig`) and partial updates (`StylePatch`)
//! - SRT parsing and export
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Caption Data                                 │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  models.rs     - Segment and its identity key                   │
//! │  style.rs      - StyleConfig, HighlightMode, StylePatch         │
//! │  formats.rs    - SRT parsing and export                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod formats;
mod models;
mod style;

pub use models::{Segment, SegmentKey};

pub use style::{HighlightMode, StyleConfig, StylePatch};

pub use formats::{
    export_srt, format_srt_timestamp, parse_segments, parse_srt, ParseError, SegmentFormat,
};
