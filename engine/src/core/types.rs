//! Subcue Core Type Definitions
//!
//! Defines fundamental types used throughout the project.

use serde::{Deserialize, Serialize};
use tracing::warn;

// =============================================================================
// Time Types
// =============================================================================

/// Time in seconds (floating point)
pub type TimeSec = f64;

// =============================================================================
// Spatial Types
// =============================================================================

/// 2D coordinates in surface (client) pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in surface (client) pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Returns true if the point lies inside the rectangle (edges inclusive)
    pub fn contains(&self, point: Point2D) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Returns true if the rectangle has a positive, finite area
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

// =============================================================================
// Color
// =============================================================================

/// Opaque RGB color (0-255 for each component)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub fn yellow() -> Self {
        Self::rgb(255, 255, 0)
    }

    /// Parses a color token: `#RRGGBB`, `#RGB`, or one of a few CSS names.
    pub fn try_from_token(token: &str) -> Result<Self, String> {
        let token = token.trim();
        match token.to_ascii_lowercase().as_str() {
            "white" => return Ok(Self::white()),
            "black" => return Ok(Self::black()),
            "yellow" => return Ok(Self::yellow()),
            "red" => return Ok(Self::rgb(255, 0, 0)),
            "green" => return Ok(Self::rgb(0, 128, 0)),
            "blue" => return Ok(Self::rgb(0, 0, 255)),
            _ => {}
        }

        let Some(hex) = token.strip_prefix('#') else {
            return Err(format!("Color must start with '#': {}", token));
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex digits in color: {}", token));
        }

        match hex.len() {
            3 => {
                let channel = |i: usize| -> Result<u8, String> {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17) // 0xF * 17 = 0xFF
                        .map_err(|e| e.to_string())
                };
                Ok(Self::rgb(channel(0)?, channel(1)?, channel(2)?))
            }
            6 => {
                let channel = |i: usize| -> Result<u8, String> {
                    u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string())
                };
                Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            len => Err(format!("Invalid hex color length: {}", len)),
        }
    }

    /// Parses a color token, falling back to white on invalid input.
    pub fn from_token(token: &str) -> Self {
        match Self::try_from_token(token) {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed to parse color '{}': {}, defaulting to white", token, e);
                Self::white()
            }
        }
    }

    /// Returns true if the token parses as a color
    pub fn is_valid_token(token: &str) -> bool {
        Self::try_from_token(token).is_ok()
    }

    /// Converts to `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Converts to ASS/SSA color format (&H00BBGGRR, alpha always opaque)
    pub fn to_ass_color(&self) -> String {
        format!("&H00{:02X}{:02X}{:02X}", self.b, self.g, self.r)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}
