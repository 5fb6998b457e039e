//! Drag-to-Position Controller
//!
//! Converts pointer coordinates into percent coordinates of the media
//! rectangle and tracks the drag session (`Idle → Dragging → Idle`).

use serde::{Deserialize, Serialize};

use crate::core::{Point2D, Rect};

/// A position in percent of the media rectangle (0..=100 on both axes)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PercentPosition {
    pub x: f64,
    pub y: f64,
}

impl PercentPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen rectangles the pointer is normalized against.
///
/// `media` is where the video frame is actually drawn; it may be smaller
/// than `container` when the frame is letterboxed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceLayout {
    pub container: Rect,
    pub media: Rect,
}

impl SurfaceLayout {
    pub fn new(container: Rect, media: Rect) -> Self {
        Self { container, media }
    }
}

/// Maps a pointer to percent coordinates of the media rectangle.
///
/// Returns `None` when the pointer lies outside the media rectangle or
/// either rectangle has no usable area.
pub fn pointer_to_percent(pointer: Point2D, container: Rect, media: Rect) -> Option<PercentPosition> {
    if !container.is_usable() || !media.is_usable() {
        return None;
    }
    if !pointer.x.is_finite() || !pointer.y.is_finite() || !media.contains(pointer) {
        return None;
    }

    let x = (pointer.x - media.left) / media.width * 100.0;
    let y = (pointer.y - media.top) / media.height * 100.0;
    Some(PercentPosition::new(x.clamp(0.0, 100.0), y.clamp(0.0, 100.0)))
}

/// Maps a percent position back to surface pixels inside `media`
pub fn percent_to_pointer(position: PercentPosition, media: Rect) -> Point2D {
    Point2D::new(
        media.left + position.x.clamp(0.0, 100.0) / 100.0 * media.width,
        media.top + position.y.clamp(0.0, 100.0) / 100.0 * media.height,
    )
}

// =============================================================================
// Drag Session
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Whether this session already produced a position
        emitted: bool,
    },
}

/// A position produced by a pointer move during a drag
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragUpdate {
    pub position: PercentPosition,
    /// True for the first update of a session
    pub first: bool,
}

/// Drag session state machine.
///
/// There is no minimum drag distance: a press and release without movement
/// opens and closes a session without producing an update.
#[derive(Clone, Debug, Default)]
pub struct PositionController {
    state: DragState,
}

impl PositionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Opens a session when `pointer` hits the subtitle's rendered box.
    ///
    /// Ignored while editing text or when no subtitle is rendered.
    pub fn pointer_down(&mut self, pointer: Point2D, subtitle_bounds: Option<Rect>, editing: bool) -> bool {
        if editing {
            return false;
        }
        let hit = subtitle_bounds.is_some_and(|bounds| bounds.contains(pointer));
        if hit {
            self.state = DragState::Dragging { emitted: false };
        }
        hit
    }

    /// Recomputes the position for a pointer move during a session
    pub fn pointer_move(&mut self, pointer: Point2D, layout: &SurfaceLayout) -> Option<DragUpdate> {
        let DragState::Dragging { emitted } = self.state else {
            return None;
        };

        let position = pointer_to_percent(pointer, layout.container, layout.media)?;
        self.state = DragState::Dragging { emitted: true };
        Some(DragUpdate {
            position,
            first: !emitted,
        })
    }

    /// Closes the session wherever the pointer was released.
    /// Returns true if a session was open.
    pub fn pointer_up(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
