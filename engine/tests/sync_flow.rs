//! End-to-end flow through the public API: JSON commands in, events out,
//! and the burn-in script checked against what the preview showed.

use serde_json::json;

use subcue_lib::core::captions::{parse_srt, Segment, StyleConfig, StylePatch};
use subcue_lib::core::playback::RecordingSeeker;
use subcue_lib::core::render::{build_ass_script, video_font_size, RenderSurface};
use subcue_lib::core::sync::SubtitleSyncEngine;
use subcue_lib::ipc::{dispatch, event_names, EngineCommand, RecordingSink, RenderStylePayload};

const TRANSCRIPT: &str = "\
1
00:00:00,000 --> 00:00:02,000
So this is how it starts

2
00:00:02,500 --> 00:00:05,000
one two three four five

3
00:00:06,000 --> 00:00:08,000
Thanks for watching!
";

fn engine() -> SubtitleSyncEngine {
    let segments = parse_srt(TRANSCRIPT).unwrap();
    SubtitleSyncEngine::new(segments, StyleConfig::default(), RenderSurface::default())
}

fn send(
    engine: &mut SubtitleSyncEngine,
    sink: &mut RecordingSink,
    command_type: &str,
    payload: serde_json::Value,
) {
    let mut seeker = RecordingSeeker::default();
    let command = EngineCommand::parse(command_type.to_string(), payload).unwrap();
    dispatch(engine, command, &mut seeker, sink).unwrap();
}

#[test]
fn playback_edit_and_style_flow() {
    let mut engine = engine();
    let mut sink = RecordingSink::default();

    send(&mut engine, &mut sink, "styleChange", json!({"useKaraoke": true}));
    send(&mut engine, &mut sink, "timeUpdate", json!({"time": 4.6}));

    let view = engine.view();
    assert_eq!(view.active_index, Some(1));
    assert_eq!(view.lines, vec!["one two three four", "five"]);
    assert_eq!(view.current_word_global_index, Some(4));

    // Shrinking the active text re-clamps the highlight in the same call.
    send(
        &mut engine,
        &mut sink,
        "textEdit",
        json!({"segmentIndex": 1, "text": "only two"}),
    );
    let view = engine.view();
    assert_eq!(view.lines, vec!["only two"]);
    assert_eq!(view.current_word_global_index, Some(1));

    send(
        &mut engine,
        &mut sink,
        "styleChange",
        json!({"allCaps": true, "removePunctuation": true, "maxWordsPerLine": 1}),
    );
    send(&mut engine, &mut sink, "timeUpdate", json!({"time": 7.0}));
    assert_eq!(engine.view().lines, vec!["THANKS", "FOR", "WATCHING"]);

    // gap between segments
    send(&mut engine, &mut sink, "timeUpdate", json!({"time": 5.5}));
    assert!(!engine.view().is_visible());

    let last = sink.last(event_names::VIEW_CHANGED).unwrap();
    assert!(last.payload["activeSegment"].is_null());
    assert_eq!(sink.events.len(), 6);
}

#[test]
fn drag_then_burn_in_matches_preview_position() {
    let mut engine = engine();
    let mut sink = RecordingSink::default();

    send(
        &mut engine,
        &mut sink,
        "setLayout",
        json!({
            "container": {"left": 0.0, "top": 0.0, "width": 640.0, "height": 480.0},
            "media": {"left": 0.0, "top": 60.0, "width": 640.0, "height": 360.0}
        }),
    );
    send(&mut engine, &mut sink, "timeUpdate", json!({"time": 1.0}));
    send(
        &mut engine,
        &mut sink,
        "pointerDown",
        json!({
            "x": 320.0, "y": 360.0,
            "subtitleBounds": {"left": 200.0, "top": 340.0, "width": 240.0, "height": 40.0}
        }),
    );
    send(&mut engine, &mut sink, "dragMove", json!({"x": 160.0, "y": 150.0}));
    send(&mut engine, &mut sink, "dragEnd", serde_json::Value::Null);

    let position = sink.last(event_names::POSITION_CHANGED).unwrap();
    assert_eq!(position.payload["customX"], 25.0);
    assert_eq!(position.payload["customY"], 25.0);

    let style = engine.style().clone();
    assert!(style.use_custom_position);

    let script = build_ass_script(engine.segments(), &style, 1280, 720).unwrap();
    assert!(script.contains(r"{\an5\pos(320,180)}So this is how"));
}

#[test]
fn preview_and_burn_in_agree_on_font_size() {
    let nominal = 36.0;
    for (preview, target) in [(640, 1280), (1920, 1920), (360, 720), (960, 3840)] {
        let mut engine = engine();
        engine.on_style_change(StylePatch {
            font_size_nominal: Some(nominal),
            ..Default::default()
        });
        engine.set_surface(RenderSurface::new(target, target, 1080));
        let at_target = engine.view().font_size_px;

        let payload = RenderStylePayload::new(engine.style().clone(), target, 1080).unwrap();
        assert_eq!(payload.effective_font_size().unwrap(), at_target, "target={target}");

        let script = build_ass_script(engine.segments(), engine.style(), target, 1080).unwrap();
        let style_line = format!("Style: Default,Sans,{},", video_font_size(nominal, target).unwrap());
        assert!(script.contains(&style_line), "target={target}");

        engine.set_surface(RenderSurface::new(preview, target, 1080));
        assert!(engine.view().font_size_px >= 12);
    }
}

#[test]
fn seek_request_reaches_the_player() {
    let mut engine = engine();
    let mut sink = RecordingSink::default();
    let mut seeker = RecordingSeeker::default();

    dispatch(
        &mut engine,
        EngineCommand::SeekToSegment { segment_index: 2 },
        &mut seeker,
        &mut sink,
    )
    .unwrap();

    assert_eq!(seeker.requests, vec![6.0]);
    assert_eq!(engine.view().lines, vec!["Thanks for watching!"]);
    let seek = sink.last(event_names::SEEK_REQUESTED).unwrap();
    assert_eq!(seek.payload["time"], 6.0);
}

#[test]
fn segments_json_matches_transcription_shape() {
    let raw = r#"[{"start": 0.0, "end": 1.5, "text": "hi"}, {"start": 2.0, "end": 3.0, "text": "there", "id": 1}]"#;
    let segments: Vec<Segment> = serde_json::from_str(raw).unwrap();
    let mut engine = SubtitleSyncEngine::new(segments, StyleConfig::default(), RenderSurface::default());
    assert_eq!(engine.on_time_update(2.5).lines, vec!["there"]);
}
