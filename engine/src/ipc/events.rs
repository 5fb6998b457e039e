//! Engine Event Module
//!
//! Events are emitted after a command has been applied, so the rendering
//! surface and the style owner stay in sync with the engine.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::core::sync::RenderViewModel;
use crate::core::{CoreResult, TimeSec};

// =============================================================================
// Event Types
// =============================================================================

/// Event names used by the engine
pub mod event_names {
    /// Fresh view model after any command
    pub const VIEW_CHANGED: &str = "subtitle:view-changed";
    /// Drag moved the subtitle; the style owner should store the position
    pub const POSITION_CHANGED: &str = "subtitle:position-changed";
    /// The playback surface should seek
    pub const SEEK_REQUESTED: &str = "playback:seek-requested";
}

// =============================================================================
// Event Payloads
// =============================================================================

/// Custom position written by a drag
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionChangedEvent {
    pub custom_x: f64,
    pub custom_y: f64,
    pub use_custom_position: bool,
}

/// Seek issued for a segment click
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekRequestedEvent {
    pub segment_index: usize,
    pub time: TimeSec,
}

/// A named event with its JSON payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineEvent {
    pub event: String,
    pub payload: serde_json::Value,
}

impl EngineEvent {
    pub fn new<T: Serialize>(event: &str, payload: &T) -> CoreResult<Self> {
        Ok(Self {
            event: event.to_string(),
            payload: serde_json::to_value(payload)?,
        })
    }

    pub fn view_changed(view: &RenderViewModel) -> CoreResult<Self> {
        Self::new(event_names::VIEW_CHANGED, view)
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Destination for engine events
pub trait EventSink {
    fn emit(&mut self, event: EngineEvent) -> CoreResult<()>;
}

/// Keeps emitted events in memory
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<EngineEvent>,
}

impl RecordingSink {
    pub fn names(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.event.as_str()).collect()
    }

    pub fn last(&self, name: &str) -> Option<&EngineEvent> {
        self.events.iter().rev().find(|e| e.event == name)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: EngineEvent) -> CoreResult<()> {
        self.events.push(event);
        Ok(())
    }
}

/// Writes one JSON object per event and line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn emit(&mut self, event: EngineEvent) -> CoreResult<()> {
        serde_json::to_writer(&mut self.writer, &event)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}
