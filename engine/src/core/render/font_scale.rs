//! Font Scaling Model
//!
//! Maps a nominal font size (authored against a 1920px wide frame) to the
//! pixel size used at a given render width. The burn-in encoder evaluates
//! [`video_font_size`] for the final frame and the preview evaluates
//! [`preview_font_size`]; both must agree to the pixel, so every rounding
//! step goes through [`round_half_up`] (ties toward +∞), never banker's
//! rounding.

use serde::{Deserialize, Serialize};

use crate::core::{CoreError, CoreResult};

/// Width the nominal font size is authored against
pub const REFERENCE_WIDTH: f64 = 1920.0;

/// Lowest scale factor; keeps narrow vertical targets legible
pub const MIN_SCALE: f64 = 0.75;

/// Targets narrower than this get [`SMALL_TARGET_BONUS`] extra pixels
pub const SMALL_TARGET_WIDTH: i64 = 1280;

pub const SMALL_TARGET_BONUS: i64 = 4;

/// Floor of the final (burned-in) font size
pub const MIN_VIDEO_FONT_PX: i64 = 18;

/// Floor of the preview font size
pub const MIN_PREVIEW_FONT_PX: i64 = 12;

/// Rounds half-way cases toward positive infinity
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Font size in pixels for a frame `target_width` pixels wide.
///
/// `max(18, round(round(nominal) * max(0.75, width / 1920)) + bonus)`
/// where `bonus` is 4 below 1280px and 0 otherwise.
pub fn video_font_size(nominal: f64, target_width: i64) -> CoreResult<u32> {
    if target_width <= 0 {
        return Err(CoreError::InvalidDimension {
            label: "targetWidth",
            value: target_width,
        });
    }
    if !nominal.is_finite() {
        return Err(CoreError::ValidationError(format!(
            "Nominal font size must be finite, got {}",
            nominal
        )));
    }

    let nominal = round_half_up(nominal);
    let scale = (target_width as f64 / REFERENCE_WIDTH).max(MIN_SCALE);
    let bonus = if target_width < SMALL_TARGET_WIDTH {
        SMALL_TARGET_BONUS
    } else {
        0
    };

    let size = (round_half_up(nominal * scale) + bonus as f64).max(MIN_VIDEO_FONT_PX as f64);
    to_pixels(size)
}

/// Font size in pixels for a preview `preview_width` pixels wide that stands
/// in for a `target_width` frame.
///
/// `max(12, round(video_font_size * preview_width / target_width))`
pub fn preview_font_size(nominal: f64, preview_width: i64, target_width: i64) -> CoreResult<u32> {
    if preview_width <= 0 {
        return Err(CoreError::InvalidDimension {
            label: "previewWidth",
            value: preview_width,
        });
    }

    let video = video_font_size(nominal, target_width)?;
    let ratio = preview_width as f64 / target_width as f64;
    let size = round_half_up(video as f64 * ratio).max(MIN_PREVIEW_FONT_PX as f64);
    to_pixels(size)
}

/// Rejects sizes that do not fit a pixel count
fn to_pixels(size: f64) -> CoreResult<u32> {
    // `as i64` saturates, so anything past u32 fails the conversion
    u32::try_from(size as i64).map_err(|_| {
        CoreError::ValidationError(format!("Font size out of range: {}px", size))
    })
}

// =============================================================================
// Render Surface
// =============================================================================

/// Preview and output resolutions the engine scales between
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSurface {
    /// Width of the on-screen media element
    pub preview_width: i64,
    /// Width of the burned-in output frame
    pub target_width: i64,
    /// Height of the burned-in output frame
    pub target_height: i64,
}

impl Default for RenderSurface {
    fn default() -> Self {
        Self {
            preview_width: 640,
            target_width: 1280,
            target_height: 720,
        }
    }
}

impl RenderSurface {
    pub fn new(preview_width: i64, target_width: i64, target_height: i64) -> Self {
        Self {
            preview_width,
            target_width,
            target_height,
        }
    }

    /// Preview font size for `nominal` on this surface
    pub fn preview_font_size(&self, nominal: f64) -> CoreResult<u32> {
        preview_font_size(nominal, self.preview_width, self.target_width)
    }

    /// Final font size for `nominal` on this surface
    pub fn video_font_size(&self, nominal: f64) -> CoreResult<u32> {
        video_font_size(nominal, self.target_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_width_is_identity() {
        assert_eq!(video_font_size(48.0, 1920).unwrap(), 48);
        assert_eq!(video_font_size(24.0, 1920).unwrap(), 24);
    }

    #[test]
    fn test_scale_floor_and_small_target_bonus() {
        // 720 / 1920 = 0.375 → clamped to 0.75; 36 + 4 bonus.
        assert_eq!(video_font_size(48.0, 720).unwrap(), 40);
        // 1280 is not "small": 24 * 0.75 = 18, no bonus.
        assert_eq!(video_font_size(24.0, 1280).unwrap(), 18);
        // 3840 doubles.
        assert_eq!(video_font_size(30.0, 3840).unwrap(), 60);
    }

    #[test]
    fn test_video_floor() {
        assert_eq!(video_font_size(0.0, 1920).unwrap(), 18);
        assert_eq!(video_font_size(10.0, 4000).unwrap(), 21);
        for w in [1, 100, 719, 1080, 1279, 1280, 1920, 7680] {
            for n in [0.0, 1.0, 7.0, 12.0, 24.0, 96.0] {
                assert!(video_font_size(n, w).unwrap() >= 18, "n={n} w={w}");
            }
        }
    }

    #[test]
    fn test_nominal_is_rounded_half_up_first() {
        // 24.5 → 25 at 1920 (not 24 as banker's rounding would give).
        assert_eq!(video_font_size(24.5, 1920).unwrap(), 25);
        assert_eq!(video_font_size(24.4, 1920).unwrap(), 24);
    }

    #[test]
    fn test_scaled_value_is_rounded_half_up() {
        // 25 * 1080/1920 = 14.0625 → 0.75 floor → 18.75 → 19, +4 bonus = 23.
        assert_eq!(video_font_size(25.0, 1080).unwrap(), 23);
        // 30 * 0.75 = 22.5 → 23 (+4) = 27.
        assert_eq!(video_font_size(30.0, 1000).unwrap(), 27);
    }

    #[test]
    fn test_preview_matches_video_at_same_width() {
        for w in [480, 720, 1080, 1280, 1920, 2560] {
            for n in [12.0, 24.0, 36.0, 48.0, 72.0] {
                assert_eq!(
                    preview_font_size(n, w, w).unwrap(),
                    video_font_size(n, w).unwrap(),
                    "n={n} w={w}"
                );
            }
        }
    }

    #[test]
    fn test_preview_scales_down_with_floor() {
        // video 48 at 1920, half-width preview → 24.
        assert_eq!(preview_font_size(48.0, 960, 1920).unwrap(), 24);
        // video 18 at 1920 shown at 320px → 3 → floor 12.
        assert_eq!(preview_font_size(18.0, 320, 1920).unwrap(), 12);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            video_font_size(24.0, 0),
            Err(CoreError::InvalidDimension { label: "targetWidth", .. })
        ));
        assert!(matches!(
            preview_font_size(24.0, -5, 1920),
            Err(CoreError::InvalidDimension { label: "previewWidth", .. })
        ));
        assert!(matches!(
            preview_font_size(24.0, 640, 0),
            Err(CoreError::InvalidDimension { label: "targetWidth", .. })
        ));
        assert!(video_font_size(f64::NAN, 1920).is_err());
    }

    #[test]
    fn test_oversized_results_are_rejected() {
        assert!(matches!(
            video_font_size(5.0e9, 1920),
            Err(CoreError::ValidationError(_))
        ));
        assert!(matches!(
            video_font_size(1.0e19, 720),
            Err(CoreError::ValidationError(_))
        ));
        assert!(matches!(
            preview_font_size(400.0, i64::MAX / 2, i64::MAX / 2),
            Err(CoreError::ValidationError(_))
        ));
        // a huge preview over a small target overflows on the ratio
        assert!(preview_font_size(400.0, i64::MAX, 1).is_err());
        assert_eq!(video_font_size(4_000_000.0, 1920).unwrap(), 4_000_000);
    }

    #[test]
    fn test_surface_helpers() {
        let surface = RenderSurface::default();
        assert_eq!(surface.video_font_size(24.0).unwrap(), 18);
        assert_eq!(surface.preview_font_size(24.0).unwrap(), 12);
    }
}
