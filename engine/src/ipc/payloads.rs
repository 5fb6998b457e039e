use serde::{Deserialize, Serialize};

use crate::core::captions::{StyleConfig, StylePatch};
use crate::core::position::SurfaceLayout;
use crate::core::render::{video_font_size, RenderSurface};
use crate::core::{CoreError, CoreResult, Rect, TimeSec};

/// Commands accepted by the preview engine.
///
/// Wire shape: `{"commandType": "...", "payload": {...}}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "commandType", content = "payload", rename_all = "camelCase")]
pub enum EngineCommand {
    #[serde(alias = "TimeUpdate", rename_all = "camelCase")]
    TimeUpdate {
        #[serde(alias = "timeSec")]
        time: TimeSec,
    },
    #[serde(alias = "StyleChange")]
    StyleChange(StylePatch),
    #[serde(alias = "TextEdit", rename_all = "camelCase")]
    TextEdit {
        #[serde(alias = "index")]
        segment_index: usize,
        text: String,
    },
    #[serde(alias = "PointerDown", rename_all = "camelCase")]
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        subtitle_bounds: Option<Rect>,
    },
    #[serde(alias = "DragMove")]
    DragMove { x: f64, y: f64 },
    #[serde(alias = "DragEnd")]
    DragEnd,
    #[serde(alias = "BeginEdit")]
    BeginEdit,
    #[serde(alias = "EndEdit")]
    EndEdit,
    #[serde(alias = "Resize")]
    Resize(RenderSurface),
    #[serde(alias = "SetLayout")]
    SetLayout(SurfaceLayout),
    #[serde(alias = "SeekToSegment", rename_all = "camelCase")]
    SeekToSegment {
        #[serde(alias = "index")]
        segment_index: usize,
    },
}

impl EngineCommand {
    pub fn parse(command_type: String, payload: serde_json::Value) -> CoreResult<Self> {
        let raw_request = serde_json::json!({
            "commandType": command_type,
            "payload": payload
        });
        serde_json::from_value(raw_request)
            .map_err(|e| CoreError::ValidationError(format!("Invalid command payload: {}", e)))
    }
}

/// Style sent to the burn-in backend.
///
/// Carries every style field plus the output frame size, so the encoder can
/// evaluate the same font formula the preview used.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderStylePayload {
    #[serde(flatten)]
    pub style: StyleConfig,
    pub screen_width: i64,
    pub screen_height: i64,
}

impl RenderStylePayload {
    pub fn new(style: StyleConfig, screen_width: i64, screen_height: i64) -> CoreResult<Self> {
        let payload = Self {
            style: style.normalized(),
            screen_width,
            screen_height,
        };
        payload.validate()?;
        Ok(payload)
    }

    /// Payload for a surface's output resolution
    pub fn for_surface(style: StyleConfig, surface: &RenderSurface) -> CoreResult<Self> {
        Self::new(style, surface.target_width, surface.target_height)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.screen_width <= 0 {
            return Err(CoreError::InvalidDimension {
                label: "screenWidth",
                value: self.screen_width,
            });
        }
        if self.screen_height <= 0 {
            return Err(CoreError::InvalidDimension {
                label: "screenHeight",
                value: self.screen_height,
            });
        }
        Ok(())
    }

    /// Font size the encoder must render at
    pub fn effective_font_size(&self) -> CoreResult<u32> {
        video_font_size(self.style.font_size_nominal, self.screen_width)
    }
}
