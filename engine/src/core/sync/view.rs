//! Render View Model
//!
//! The render-ready snapshot the orchestrator derives after every operation.

use serde::{Deserialize, Serialize};

use crate::core::captions::{HighlightMode, Segment, StyleConfig};
use crate::core::position::ResolvedPosition;
use crate::core::text::FormattedWord;
use crate::core::Point2D;

/// Current-word decoration, present only in karaoke mode
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightAppearance {
    pub mode: HighlightMode,
    pub color: String,
    pub border_color: String,
}

/// Everything the surface needs to draw the text besides its content
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAppearance {
    pub font_family: String,
    pub font_color: String,
    pub border_color: String,
    pub border_width_px: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightAppearance>,
}

impl TextAppearance {
    pub fn from_style(style: &StyleConfig) -> Self {
        let highlight = style.use_karaoke.then(|| HighlightAppearance {
            mode: style.highlight_mode,
            color: style.current_word_color().to_hex(),
            border_color: style.current_word_border_color().to_hex(),
        });

        Self {
            font_family: style.font_family.clone(),
            font_color: style.font_color().to_hex(),
            border_color: style.border_color().to_hex(),
            border_width_px: style.border_width_px,
            highlight,
        }
    }
}

/// Render-ready snapshot of the subtitle overlay
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderViewModel {
    /// Segment shown at the current time
    pub active_segment: Option<Segment>,
    /// Position of `active_segment` in the collection
    pub active_index: Option<usize>,
    pub lines: Vec<String>,
    pub words: Vec<FormattedWord>,
    /// Global index of the spoken word; `None` unless karaoke is on
    pub current_word_global_index: Option<usize>,
    pub position: ResolvedPosition,
    /// `position` in surface pixels, once the media rectangle is known
    pub anchor_point: Option<Point2D>,
    pub font_size_px: u32,
    pub appearance: TextAppearance,
}

impl RenderViewModel {
    /// True when there is text to draw
    pub fn is_visible(&self) -> bool {
        self.active_segment.is_some() && !self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::position::resolve_position;

    #[test]
    fn test_appearance_has_highlight_only_in_karaoke_mode() {
        let style = StyleConfig::default();
        assert!(TextAppearance::from_style(&style).highlight.is_none());

        let style = StyleConfig {
            use_karaoke: true,
            current_word_color: "#f00".to_string(),
            highlight_mode: HighlightMode::Glow,
            ..Default::default()
        };
        let appearance = TextAppearance::from_style(&style);
        let highlight = appearance.highlight.unwrap();
        assert_eq!(highlight.color, "#FF0000");
        assert_eq!(highlight.mode, HighlightMode::Glow);
        assert_eq!(appearance.font_color, "#FFFFFF");
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let style = StyleConfig::default();
        let view = RenderViewModel {
            active_segment: Some(Segment::new(0.0, 1.0, "hi")),
            active_index: Some(0),
            lines: vec!["hi".to_string()],
            words: Vec::new(),
            current_word_global_index: None,
            position: resolve_position(&style),
            anchor_point: None,
            font_size_px: 12,
            appearance: TextAppearance::from_style(&style),
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["fontSizePx"], 12);
        assert_eq!(json["activeIndex"], 0);
        assert_eq!(json["position"]["yPercent"], 85.0);
        assert_eq!(json["appearance"]["borderWidthPx"], 2.0);
        assert!(json["appearance"].get("highlight").is_none());
        assert!(json["anchorPoint"].is_null());
        assert!(view.is_visible());
    }
}
