//! Subtitle Sync Engine
//!
//! Composes segment lookup, text layout, word timing, font scaling and the
//! drag controller behind explicit operations. Every operation recomputes
//! the [`RenderViewModel`] from scratch; nothing is patched incrementally.
//!
//! Operations never fail. Bad input degrades to the previous or a default
//! value and is reported through `tracing`.

use tracing::{debug, trace, warn};

use super::view::{RenderViewModel, TextAppearance};
use crate::core::captions::{Segment, SegmentKey, StyleConfig, StylePatch};
use crate::core::playback::{audit_segments, current_word_index, locate, Seeker};
use crate::core::position::{
    percent_to_pointer, resolve_position, PercentPosition, PositionController, SurfaceLayout,
};
use crate::core::render::{RenderSurface, MIN_PREVIEW_FONT_PX};
use crate::core::text::{format_text, FormatOptions, FormattedDisplay};
use crate::core::{CoreError, Point2D, Rect, TimeSec};

/// The segment on screen and its laid-out text
#[derive(Clone, Debug)]
struct ActiveSegment {
    index: usize,
    key: SegmentKey,
    display: FormattedDisplay,
}

/// Single-threaded orchestrator of the subtitle preview
#[derive(Debug)]
pub struct SubtitleSyncEngine {
    segments: Vec<Segment>,
    style: StyleConfig,
    surface: RenderSurface,
    layout: Option<SurfaceLayout>,
    last_time: Option<TimeSec>,
    active: Option<ActiveSegment>,
    current_word: usize,
    controller: PositionController,
    editing: bool,
    last_font_size: u32,
    view: RenderViewModel,
}

impl SubtitleSyncEngine {
    /// Creates an engine over `segments`, which should be ordered by start.
    ///
    /// Out-of-order or invalid segments are logged and kept.
    pub fn new(segments: Vec<Segment>, style: StyleConfig, surface: RenderSurface) -> Self {
        audit_segments(&segments);

        let style = style.normalized();
        let view = RenderViewModel {
            active_segment: None,
            active_index: None,
            lines: Vec::new(),
            words: Vec::new(),
            current_word_global_index: None,
            position: resolve_position(&style),
            anchor_point: None,
            font_size_px: MIN_PREVIEW_FONT_PX as u32,
            appearance: TextAppearance::from_style(&style),
        };

        let mut engine = Self {
            segments,
            style,
            surface,
            layout: None,
            last_time: None,
            active: None,
            current_word: 0,
            controller: PositionController::new(),
            editing: false,
            last_font_size: MIN_PREVIEW_FONT_PX as u32,
            view,
        };
        engine.rebuild_view();
        engine
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn view(&self) -> &RenderViewModel {
        &self.view
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn surface(&self) -> RenderSurface {
        self.surface
    }

    pub fn layout(&self) -> Option<SurfaceLayout> {
        self.layout
    }

    /// Last playback time received
    pub fn current_time(&self) -> Option<TimeSec> {
        self.last_time
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    // =========================================================================
    // Timing
    // =========================================================================

    /// Processes a playback time; seeks are handled like any other tick
    pub fn on_time_update(&mut self, time: TimeSec) -> &RenderViewModel {
        if !time.is_finite() {
            warn!("Ignoring non-finite playback time {}", time);
            return &self.view;
        }
        self.last_time = Some(time);

        match locate(&self.segments, time) {
            Some(index) => {
                let key = self.segments[index].key();
                let changed = self
                    .active
                    .as_ref()
                    .is_none_or(|active| active.index != index || active.key != key);
                if changed {
                    debug!("Active segment -> {} at {:.3}s", index, time);
                    self.active = Some(ActiveSegment {
                        index,
                        key,
                        display: self.layout_segment(index),
                    });
                    self.current_word = 0;
                }
            }
            None => {
                if let Some(active) = self.active.take() {
                    debug!("Segment {} ended at {:.3}s", active.index, time);
                }
                self.current_word = 0;
            }
        }

        self.update_word_index();
        self.rebuild_view();
        &self.view
    }

    /// Asks the playback surface to seek to a segment, then processes that
    /// time as a regular tick. Returns the seek target.
    pub fn seek_to_segment(&mut self, index: usize, seeker: &mut impl Seeker) -> Option<TimeSec> {
        let Some(segment) = self.segments.get(index) else {
            warn!("Cannot seek: {}", CoreError::SegmentNotFound(index));
            return None;
        };

        let target = segment.start;
        seeker.seek(target);
        self.on_time_update(target);
        Some(target)
    }

    // =========================================================================
    // Style and Text
    // =========================================================================

    /// Merges a partial style; re-lays out the active segment if a
    /// layout-relevant field changed
    pub fn on_style_change(&mut self, patch: StylePatch) -> &RenderViewModel {
        let before = FormatOptions::from(&self.style);
        self.style.apply_patch(patch);

        if FormatOptions::from(&self.style) != before {
            if let Some(index) = self.active.as_ref().map(|a| a.index) {
                debug!("Layout options changed, re-formatting segment {}", index);
                let display = self.layout_segment(index);
                if let Some(active) = self.active.as_mut() {
                    active.display = display;
                }
            }
        }

        self.update_word_index();
        self.rebuild_view();
        &self.view
    }

    /// Replaces a segment's text; the preview follows immediately when the
    /// segment is on screen
    pub fn on_text_edit(&mut self, index: usize, text: impl Into<String>) -> &RenderViewModel {
        let Some(segment) = self.segments.get_mut(index) else {
            warn!("Ignoring text edit: {}", CoreError::SegmentNotFound(index));
            return &self.view;
        };
        segment.text = text.into();

        if self.active.as_ref().is_some_and(|a| a.index == index) {
            let display = self.layout_segment(index);
            if let Some(active) = self.active.as_mut() {
                active.display = display;
            }
            debug!("Re-formatted edited segment {}", index);
        }

        self.update_word_index();
        self.rebuild_view();
        &self.view
    }

    /// Enters text-edit mode, cancelling any drag
    pub fn begin_edit(&mut self) -> &RenderViewModel {
        self.editing = true;
        self.controller.cancel();
        &self.view
    }

    pub fn end_edit(&mut self) -> &RenderViewModel {
        self.editing = false;
        &self.view
    }

    // =========================================================================
    // Surface and Drag
    // =========================================================================

    pub fn set_surface(&mut self, surface: RenderSurface) -> &RenderViewModel {
        self.surface = surface;
        self.rebuild_view();
        &self.view
    }

    pub fn set_layout(&mut self, layout: SurfaceLayout) -> &RenderViewModel {
        self.layout = Some(layout);
        self.rebuild_view();
        &self.view
    }

    /// Starts a drag when the pointer hits the rendered subtitle box.
    /// `subtitle_bounds` is measured by the surface that drew the text.
    pub fn on_pointer_down(&mut self, pointer: Point2D, subtitle_bounds: Option<Rect>) -> bool {
        let bounds = subtitle_bounds.filter(|_| self.view.is_visible());
        let started = self.controller.pointer_down(pointer, bounds, self.editing);
        if started {
            debug!("Drag started at ({:.1}, {:.1})", pointer.x, pointer.y);
        }
        started
    }

    /// Moves the subtitle during a drag. The first position of a session
    /// switches the style to custom placement.
    pub fn on_drag_move(&mut self, pointer: Point2D) -> Option<PercentPosition> {
        if !self.controller.is_dragging() {
            return None;
        }
        let Some(layout) = self.layout else {
            warn!("Drag move without a surface layout");
            return None;
        };

        let update = self.controller.pointer_move(pointer, &layout)?;
        let position = update.position;
        let patch = if update.first {
            StylePatch::custom_position(position.x, position.y)
        } else {
            StylePatch {
                custom_x: Some(position.x),
                custom_y: Some(position.y),
                ..Default::default()
            }
        };

        self.style.apply_patch(patch);
        self.rebuild_view();
        Some(position)
    }

    /// Ends the drag session; returns true if one was open
    pub fn on_drag_end(&mut self) -> bool {
        self.controller.pointer_up()
    }

    // =========================================================================
    // Derivation
    // =========================================================================

    fn layout_segment(&self, index: usize) -> FormattedDisplay {
        format_text(&self.segments[index].text, &FormatOptions::from(&self.style))
    }

    /// Recomputes the karaoke index from the last time and clamps it to the
    /// active word count
    fn update_word_index(&mut self) {
        let Some(active) = self.active.as_ref() else {
            self.current_word = 0;
            return;
        };

        let count = active.display.word_count();
        let previous = self.current_word;
        let next = match (self.style.use_karaoke, self.last_time) {
            (true, Some(time)) => {
                current_word_index(&self.segments[active.index], count, time, previous)
            }
            _ => previous.min(count.saturating_sub(1)),
        };

        if next != previous {
            trace!("Current word {} -> {}", previous, next);
        }
        self.current_word = next;
    }

    fn font_size(&mut self) -> u32 {
        match self.surface.preview_font_size(self.style.font_size_nominal) {
            Ok(size) => {
                self.last_font_size = size;
                size
            }
            Err(e) => {
                warn!("{}; keeping {}px", e, self.last_font_size);
                self.last_font_size
            }
        }
    }

    fn rebuild_view(&mut self) {
        let font_size_px = self.font_size();
        let (active_segment, active_index, lines, words, current) = match &self.active {
            Some(active) => {
                let current = (self.style.use_karaoke && !active.display.is_empty())
                    .then_some(self.current_word);
                (
                    Some(self.segments[active.index].clone()),
                    Some(active.index),
                    active.display.lines.clone(),
                    active.display.words.clone(),
                    current,
                )
            }
            None => (None, None, Vec::new(), Vec::new(), None),
        };

        let position = resolve_position(&self.style);
        let anchor_point = self
            .layout
            .filter(|layout| layout.media.is_usable())
            .map(|layout| {
                let percent = PercentPosition::new(position.x_percent, position.y_percent);
                percent_to_pointer(percent, layout.media)
            });

        self.view = RenderViewModel {
            active_segment,
            active_index,
            lines,
            words,
            current_word_global_index: current,
            position,
            anchor_point,
            font_size_px,
            appearance: TextAppearance::from_style(&self.style),
        };
    }
}
