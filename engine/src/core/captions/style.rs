//! Subtitle Style Configuration
//!
//! `StyleConfig` is the single style value shared by the interactive preview
//! and the burn-in backend. It is tolerant by construction:
//! - every key is optional on input (missing keys take defaults)
//! - out-of-range numbers are clamped by [`StyleConfig::normalize`]
//! - keys this version does not know are kept in `extra` and written back

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::core::position::{AnchorToken, CUSTOM_POSITION_TOKEN};
use crate::core::Color;

// =============================================================================
// Highlight Mode
// =============================================================================

/// Decoration applied to the currently spoken word in karaoke mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMode {
    /// Color change only
    #[default]
    None,
    /// Drop shadow behind the word
    Shadow,
    /// Wider outline in the highlight border color
    Border,
    /// Soft blurred halo
    Glow,
    /// Outline drawn twice as wide
    DoubleBorder,
    /// Large drop shadow
    ThickShadow,
}

impl HighlightMode {
    /// Parses a highlight mode token (case-insensitive, `-` or `_` separated)
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "none" | "" => Some(Self::None),
            "shadow" => Some(Self::Shadow),
            "border" => Some(Self::Border),
            "glow" => Some(Self::Glow),
            "double_border" => Some(Self::DoubleBorder),
            "thick_shadow" => Some(Self::ThickShadow),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for HighlightMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw).unwrap_or_else(|| {
            warn!("Unknown highlight mode '{}', using none", raw);
            Self::None
        }))
    }
}

// =============================================================================
// Style Config
// =============================================================================

/// Lower and upper bounds applied by `normalize`
pub const MAX_LINES_RANGE: (i64, i64) = (1, 20);
pub const MAX_WORDS_PER_LINE_RANGE: (i64, i64) = (1, 20);
pub const FONT_SIZE_RANGE: (f64, f64) = (1.0, 400.0);
pub const BORDER_WIDTH_RANGE: (f64, f64) = (0.0, 20.0);

/// Subtitle style shared by preview and burn-in
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    /// Font family name
    pub font_family: String,

    /// Font size at the 1920px reference width, before scaling
    #[serde(alias = "fontSize")]
    pub font_size_nominal: f64,

    /// Base text color
    pub font_color: String,

    /// Outline color
    pub border_color: String,

    /// Outline width in pixels
    #[serde(alias = "borderWidth")]
    pub border_width_px: f64,

    /// Anchor token, e.g. "bottom", "bottom-20", "top-left"
    pub position: String,

    /// Use `custom_x`/`custom_y` instead of the anchor token
    pub use_custom_position: bool,

    /// Horizontal center of the subtitle block, percent of media width
    pub custom_x: f64,

    /// Vertical center of the subtitle block, percent of media height
    pub custom_y: f64,

    /// Maximum number of display lines
    pub max_lines: i64,

    /// Maximum number of words per line (except the last)
    pub max_words_per_line: i64,

    /// Upper-case the text before layout
    pub all_caps: bool,

    /// Strip punctuation before layout
    pub remove_punctuation: bool,

    /// Highlight the currently spoken word
    pub use_karaoke: bool,

    /// Fill color of the current word
    pub current_word_color: String,

    /// Outline color of the current word
    pub current_word_border_color: String,

    /// Decoration of the current word
    pub highlight_mode: HighlightMode,

    /// Keys this version does not interpret, kept for round-tripping
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_font_color() -> String {
    "#FFFFFF".to_string()
}

fn default_border_color() -> String {
    "#000000".to_string()
}

fn default_current_word_color() -> String {
    "#FFFF00".to_string()
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "Sans".to_string(),
            font_size_nominal: 24.0,
            font_color: default_font_color(),
            border_color: default_border_color(),
            border_width_px: 2.0,
            position: "bottom".to_string(),
            use_custom_position: false,
            custom_x: 50.0,
            custom_y: 90.0,
            max_lines: 3,
            max_words_per_line: 4,
            all_caps: false,
            remove_punctuation: false,
            use_karaoke: false,
            current_word_color: default_current_word_color(),
            current_word_border_color: default_border_color(),
            highlight_mode: HighlightMode::None,
            extra: Map::new(),
        }
    }
}

impl StyleConfig {
    /// Clamps numeric fields and repairs invalid colors in place.
    ///
    /// Never fails: the preview re-applies this on every change and must keep
    /// rendering whatever the caller sent.
    pub fn normalize(&mut self) {
        self.font_size_nominal = clamp_f64(
            self.font_size_nominal,
            FONT_SIZE_RANGE.0,
            FONT_SIZE_RANGE.1,
            24.0,
        );
        self.border_width_px = clamp_f64(
            self.border_width_px,
            BORDER_WIDTH_RANGE.0,
            BORDER_WIDTH_RANGE.1,
            2.0,
        );
        self.custom_x = clamp_f64(self.custom_x, 0.0, 100.0, 50.0);
        self.custom_y = clamp_f64(self.custom_y, 0.0, 100.0, 90.0);
        self.max_lines = self.max_lines.clamp(MAX_LINES_RANGE.0, MAX_LINES_RANGE.1);
        self.max_words_per_line = self
            .max_words_per_line
            .clamp(MAX_WORDS_PER_LINE_RANGE.0, MAX_WORDS_PER_LINE_RANGE.1);

        repair_color("fontColor", &mut self.font_color, default_font_color);
        repair_color("borderColor", &mut self.border_color, default_border_color);
        repair_color(
            "currentWordColor",
            &mut self.current_word_color,
            default_current_word_color,
        );
        repair_color(
            "currentWordBorderColor",
            &mut self.current_word_border_color,
            default_border_color,
        );

        repair_position(&mut self.position);

        if self.font_family.trim().is_empty() {
            self.font_family = Self::default().font_family;
        }
    }

    /// Returns a normalized copy
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Merges a partial update, then normalizes
    pub fn apply_patch(&mut self, patch: StylePatch) {
        let StylePatch {
            font_family,
            font_size_nominal,
            font_color,
            border_color,
            border_width_px,
            position,
            use_custom_position,
            custom_x,
            custom_y,
            max_lines,
            max_words_per_line,
            all_caps,
            remove_punctuation,
            use_karaoke,
            current_word_color,
            current_word_border_color,
            highlight_mode,
            extra,
        } = patch;

        assign(&mut self.font_family, font_family);
        assign(&mut self.font_size_nominal, font_size_nominal);
        assign(&mut self.font_color, font_color);
        assign(&mut self.border_color, border_color);
        assign(&mut self.border_width_px, border_width_px);
        assign(&mut self.position, position);
        assign(&mut self.use_custom_position, use_custom_position);
        assign(&mut self.custom_x, custom_x);
        assign(&mut self.custom_y, custom_y);
        assign(&mut self.max_lines, max_lines);
        assign(&mut self.max_words_per_line, max_words_per_line);
        assign(&mut self.all_caps, all_caps);
        assign(&mut self.remove_punctuation, remove_punctuation);
        assign(&mut self.use_karaoke, use_karaoke);
        assign(&mut self.current_word_color, current_word_color);
        assign(&mut self.current_word_border_color, current_word_border_color);
        assign(&mut self.highlight_mode, highlight_mode);
        self.extra.extend(extra);

        self.normalize();
    }

    /// Parsed base text color
    pub fn font_color(&self) -> Color {
        Color::from_token(&self.font_color)
    }

    /// Parsed outline color
    pub fn border_color(&self) -> Color {
        Color::from_token(&self.border_color)
    }

    /// Parsed current-word fill color
    pub fn current_word_color(&self) -> Color {
        Color::from_token(&self.current_word_color)
    }

    /// Parsed current-word outline color
    pub fn current_word_border_color(&self) -> Color {
        Color::from_token(&self.current_word_border_color)
    }
}

fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn clamp_f64(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(min, max)
}

fn repair_color(label: &str, value: &mut String, fallback: fn() -> String) {
    if !Color::is_valid_token(value) {
        warn!("Invalid {} '{}', resetting to default", label, value);
        *value = fallback();
    }
}

fn repair_position(value: &mut String) {
    let token = value.trim();
    if token.eq_ignore_ascii_case(CUSTOM_POSITION_TOKEN) || token.parse::<AnchorToken>().is_ok() {
        return;
    }
    warn!("Invalid position '{}', resetting to default", value);
    *value = StyleConfig::default().position;
}

// =============================================================================
// Style Patch
// =============================================================================

/// Partial style update; absent keys leave the current value untouched
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(alias = "fontSize", skip_serializing_if = "Option::is_none")]
    pub font_size_nominal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(alias = "borderWidth", skip_serializing_if = "Option::is_none")]
    pub border_width_px: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_custom_position: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_words_per_line: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_caps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_punctuation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_karaoke: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_word_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_word_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_mode: Option<HighlightMode>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StylePatch {
    /// Patch that moves the subtitle to a custom percent position
    pub fn custom_position(x_percent: f64, y_percent: f64) -> Self {
        Self {
            use_custom_position: Some(true),
            custom_x: Some(x_percent),
            custom_y: Some(y_percent),
            ..Default::default()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
