//! Command Dispatch
//!
//! Applies an [`EngineCommand`] to the engine and emits the resulting
//! events. `subtitle:view-changed` follows every command; position and seek
//! events follow only when the command produced them.

use tracing::debug;

use super::events::{
    event_names, EngineEvent, EventSink, PositionChangedEvent, SeekRequestedEvent,
};
use super::payloads::EngineCommand;
use crate::core::playback::Seeker;
use crate::core::sync::SubtitleSyncEngine;
use crate::core::{CoreResult, Point2D};

/// Applies `command`, then emits its events to `sink`
pub fn dispatch(
    engine: &mut SubtitleSyncEngine,
    command: EngineCommand,
    seeker: &mut impl Seeker,
    sink: &mut impl EventSink,
) -> CoreResult<()> {
    let mut follow_ups = Vec::new();

    match command {
        EngineCommand::TimeUpdate { time } => {
            engine.on_time_update(time);
        }
        EngineCommand::StyleChange(patch) => {
            engine.on_style_change(patch);
        }
        EngineCommand::TextEdit {
            segment_index,
            text,
        } => {
            engine.on_text_edit(segment_index, text);
        }
        EngineCommand::PointerDown {
            x,
            y,
            subtitle_bounds,
        } => {
            engine.on_pointer_down(Point2D::new(x, y), subtitle_bounds);
        }
        EngineCommand::DragMove { x, y } => {
            if engine.on_drag_move(Point2D::new(x, y)).is_some() {
                let style = engine.style();
                let event = PositionChangedEvent {
                    custom_x: style.custom_x,
                    custom_y: style.custom_y,
                    use_custom_position: style.use_custom_position,
                };
                follow_ups.push(EngineEvent::new(event_names::POSITION_CHANGED, &event)?);
            }
        }
        EngineCommand::DragEnd => {
            engine.on_drag_end();
        }
        EngineCommand::BeginEdit => {
            engine.begin_edit();
        }
        EngineCommand::EndEdit => {
            engine.end_edit();
        }
        EngineCommand::Resize(surface) => {
            engine.set_surface(surface);
        }
        EngineCommand::SetLayout(layout) => {
            engine.set_layout(layout);
        }
        EngineCommand::SeekToSegment { segment_index } => {
            if let Some(time) = engine.seek_to_segment(segment_index, seeker) {
                let event = SeekRequestedEvent {
                    segment_index,
                    time,
                };
                follow_ups.push(EngineEvent::new(event_names::SEEK_REQUESTED, &event)?);
            }
        }
    }

    sink.emit(EngineEvent::view_changed(engine.view())?)?;
    for event in follow_ups {
        debug!("Emitting {}", event.event);
        sink.emit(event)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::captions::{Segment, StyleConfig};
    use crate::core::playback::RecordingSeeker;
    use crate::core::position::SurfaceLayout;
    use crate::core::render::RenderSurface;
    use crate::core::Rect;
    use crate::ipc::RecordingSink;
    use serde_json::json;

    fn engine() -> SubtitleSyncEngine {
        SubtitleSyncEngine::new(
            vec![
                Segment::new(0.0, 2.0, "first line"),
                Segment::new(3.0, 4.0, "second"),
            ],
            StyleConfig::default(),
            RenderSurface::default(),
        )
    }

    fn run(engine: &mut SubtitleSyncEngine, sink: &mut RecordingSink, commands: Vec<EngineCommand>) {
        let mut seeker = RecordingSeeker::default();
        for command in commands {
            dispatch(engine, command, &mut seeker, sink).unwrap();
        }
    }

    #[test]
    fn every_command_emits_view_changed() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();
        run(
            &mut engine,
            &mut sink,
            vec![
                EngineCommand::TimeUpdate { time: 1.0 },
                EngineCommand::BeginEdit,
                EngineCommand::EndEdit,
            ],
        );

        assert_eq!(sink.names(), vec![event_names::VIEW_CHANGED; 3]);
        let view = &sink.events[0].payload;
        assert_eq!(view["lines"], json!(["first line"]));
    }

    #[test]
    fn drag_emits_position_changed() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();
        let layout = SurfaceLayout::new(
            Rect::new(0.0, 0.0, 400.0, 300.0),
            Rect::new(0.0, 0.0, 400.0, 300.0),
        );

        run(
            &mut engine,
            &mut sink,
            vec![
                EngineCommand::SetLayout(layout),
                EngineCommand::TimeUpdate { time: 1.0 },
                EngineCommand::PointerDown {
                    x: 200.0,
                    y: 250.0,
                    subtitle_bounds: Some(Rect::new(150.0, 240.0, 100.0, 20.0)),
                },
                EngineCommand::DragMove { x: 100.0, y: 150.0 },
                EngineCommand::DragEnd,
            ],
        );

        let event = sink.last(event_names::POSITION_CHANGED).unwrap();
        assert_eq!(event.payload["customX"], 25.0);
        assert_eq!(event.payload["customY"], 50.0);
        assert_eq!(event.payload["useCustomPosition"], true);
        assert_eq!(
            sink.names()
                .iter()
                .filter(|n| **n == event_names::POSITION_CHANGED)
                .count(),
            1
        );
    }

    #[test]
    fn seek_emits_seek_requested() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();
        let mut seeker = RecordingSeeker::default();

        dispatch(
            &mut engine,
            EngineCommand::SeekToSegment { segment_index: 1 },
            &mut seeker,
            &mut sink,
        )
        .unwrap();

        assert_eq!(seeker.requests, vec![3.0]);
        assert_eq!(
            sink.names(),
            vec![event_names::VIEW_CHANGED, event_names::SEEK_REQUESTED]
        );
        assert_eq!(sink.events[0].payload["activeIndex"], 1);
    }

    #[test]
    fn unknown_segment_seek_only_emits_view() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();
        run(
            &mut engine,
            &mut sink,
            vec![EngineCommand::SeekToSegment { segment_index: 7 }],
        );
        assert_eq!(sink.names(), vec![event_names::VIEW_CHANGED]);
    }
}
