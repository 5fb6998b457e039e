//! Anchor Tokens
//!
//! Named placements such as `"bottom"`, `"bottom-20"` or `"top-left"`,
//! resolved to a percent position plus a horizontal alignment.
//!
//! Grammar: `<vertical>[-<horizontal>]`, where vertical is one of `top`,
//! `top-20`, `top-30`, `top-40`, `middle`, `bottom-40`, `bottom-30`,
//! `bottom-20`, `bottom` and horizontal is one of `left`, `center`, `right`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::captions::StyleConfig;
use crate::core::CoreError;

/// Position token that selects the custom percent coordinates
pub const CUSTOM_POSITION_TOKEN: &str = "custom";

// =============================================================================
// Anchors
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VerticalAnchor {
    Top,
    Top20,
    Top30,
    Top40,
    Middle,
    Bottom40,
    Bottom30,
    Bottom20,
    #[default]
    Bottom,
}

impl VerticalAnchor {
    const ALL: [(&'static str, VerticalAnchor); 9] = [
        ("top", VerticalAnchor::Top),
        ("top-20", VerticalAnchor::Top20),
        ("top-30", VerticalAnchor::Top30),
        ("top-40", VerticalAnchor::Top40),
        ("middle", VerticalAnchor::Middle),
        ("bottom-40", VerticalAnchor::Bottom40),
        ("bottom-30", VerticalAnchor::Bottom30),
        ("bottom-20", VerticalAnchor::Bottom20),
        ("bottom", VerticalAnchor::Bottom),
    ];

    /// Vertical center of the subtitle block, percent from the top
    pub fn y_percent(self) -> f64 {
        match self {
            Self::Top => 10.0,
            Self::Top20 => 20.0,
            Self::Top30 => 30.0,
            Self::Top40 => 40.0,
            Self::Middle => 50.0,
            Self::Bottom40 => 60.0,
            Self::Bottom30 => 70.0,
            Self::Bottom20 => 80.0,
            Self::Bottom => 85.0,
        }
    }

    fn token(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(_, anchor)| *anchor == self)
            .map(|(token, _)| *token)
            .unwrap_or("bottom")
    }
}

/// Horizontal text alignment, which doubles as the horizontal anchor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    /// Block starts at the anchor point
    Left,
    /// Block is centered on the anchor point (default)
    #[default]
    Center,
    /// Block ends at the anchor point
    Right,
}

impl TextAlignment {
    /// Horizontal anchor point, percent from the left
    pub fn x_percent(self) -> f64 {
        match self {
            Self::Left => 10.0,
            Self::Center => 50.0,
            Self::Right => 90.0,
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// A parsed anchor token
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AnchorToken {
    pub vertical: VerticalAnchor,
    pub horizontal: TextAlignment,
}

impl FromStr for AnchorToken {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = raw.trim().to_ascii_lowercase();

        let (vertical_part, horizontal) = match token.rsplit_once('-') {
            Some((rest, "left")) => (rest, TextAlignment::Left),
            Some((rest, "right")) => (rest, TextAlignment::Right),
            Some((rest, "center")) => (rest, TextAlignment::Center),
            _ => (token.as_str(), TextAlignment::Center),
        };

        VerticalAnchor::ALL
            .iter()
            .find(|(name, _)| *name == vertical_part)
            .map(|(_, vertical)| Self {
                vertical: *vertical,
                horizontal,
            })
            .ok_or_else(|| CoreError::MalformedAnchorToken(raw.to_string()))
    }
}

impl fmt::Display for AnchorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.horizontal {
            TextAlignment::Center => write!(f, "{}", self.vertical.token()),
            h => write!(f, "{}-{}", self.vertical.token(), h.token()),
        }
    }
}

impl AnchorToken {
    pub fn resolve(self) -> ResolvedPosition {
        ResolvedPosition {
            x_percent: self.horizontal.x_percent(),
            y_percent: self.vertical.y_percent(),
            alignment: self.horizontal,
            custom: false,
        }
    }
}

// =============================================================================
// Resolved Position
// =============================================================================

/// Where the subtitle block sits, in percent of the media rectangle.
///
/// The block is vertically centered on `y_percent`; horizontally it starts,
/// centers or ends at `x_percent` according to `alignment`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPosition {
    pub x_percent: f64,
    pub y_percent: f64,
    pub alignment: TextAlignment,
    /// True when placed by custom coordinates rather than an anchor token
    pub custom: bool,
}

/// Resolves the style's placement.
///
/// Custom placement wins when `use_custom_position` is set or the token is
/// `"custom"`. An unrecognized token falls back to `"bottom"`;
/// [`StyleConfig::normalize`] repairs such tokens before they get here.
pub fn resolve_position(style: &StyleConfig) -> ResolvedPosition {
    let token = style.position.trim();
    if style.use_custom_position || token.eq_ignore_ascii_case(CUSTOM_POSITION_TOKEN) {
        return ResolvedPosition {
            x_percent: style.custom_x,
            y_percent: style.custom_y,
            alignment: TextAlignment::Center,
            custom: true,
        };
    }

    match token.parse::<AnchorToken>() {
        Ok(anchor) => anchor.resolve(),
        Err(e) => {
            trace!("{}; falling back to bottom", e);
            AnchorToken::default().resolve()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_lookup_table() {
        let expected = [
            ("top", 10.0),
            ("top-20", 20.0),
            ("top-30", 30.0),
            ("top-40", 40.0),
            ("middle", 50.0),
            ("bottom-40", 60.0),
            ("bottom-30", 70.0),
            ("bottom-20", 80.0),
            ("bottom", 85.0),
        ];
        for (token, y) in expected {
            let anchor: AnchorToken = token.parse().unwrap();
            assert_eq!(anchor.resolve().y_percent, y, "{token}");
            assert_eq!(anchor.resolve().x_percent, 50.0, "{token}");
        }
    }

    #[test]
    fn test_horizontal_suffix() {
        let anchor: AnchorToken = "top-left".parse().unwrap();
        assert_eq!(anchor.vertical, VerticalAnchor::Top);
        assert_eq!(anchor.horizontal, TextAlignment::Left);
        assert_eq!(anchor.resolve().x_percent, 10.0);

        let anchor: AnchorToken = "Bottom-20-Right".parse().unwrap();
        assert_eq!(anchor.vertical, VerticalAnchor::Bottom20);
        assert_eq!(anchor.resolve().x_percent, 90.0);
        assert_eq!(anchor.resolve().alignment, TextAlignment::Right);
    }

    #[test]
    fn test_malformed_tokens() {
        for token in ["", "left", "bottom-10", "sideways", "top-left-right"] {
            assert!(
                matches!(
                    token.parse::<AnchorToken>(),
                    Err(CoreError::MalformedAnchorToken(_))
                ),
                "{token}"
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        for token in ["bottom", "top-30", "middle-left", "bottom-20-right"] {
            let anchor: AnchorToken = token.parse().unwrap();
            assert_eq!(anchor.to_string(), token);
        }
    }

    #[test]
    fn test_resolve_falls_back_to_bottom() {
        let style = StyleConfig {
            position: "upside-down".to_string(),
            ..Default::default()
        };
        let resolved = resolve_position(&style);
        assert_eq!(resolved.y_percent, 85.0);
        assert_eq!(resolved.x_percent, 50.0);
        assert!(!resolved.custom);
    }

    #[test]
    fn test_resolve_custom() {
        let style = StyleConfig {
            use_custom_position: true,
            custom_x: 30.0,
            custom_y: 12.5,
            position: "top-left".to_string(),
            ..Default::default()
        };
        let resolved = resolve_position(&style);
        assert_eq!(resolved.x_percent, 30.0);
        assert_eq!(resolved.y_percent, 12.5);
        assert_eq!(resolved.alignment, TextAlignment::Center);
        assert!(resolved.custom);

        let style = StyleConfig {
            position: "custom".to_string(),
            ..Default::default()
        };
        assert!(resolve_position(&style).custom);
    }
}
