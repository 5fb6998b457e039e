//! Subcue Error Definitions
//!
//! Defines error types used throughout the project.

use thiserror::Error;

use super::captions::ParseError;
use super::TimeSec;

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    // =========================================================================
    // Layout Errors
    // =========================================================================
    #[error("Invalid dimension: {label} must be positive, got {value}")]
    InvalidDimension { label: &'static str, value: i64 },

    #[error("Malformed anchor token: {0}")]
    MalformedAnchorToken(String),

    // =========================================================================
    // Segment Errors
    // =========================================================================
    #[error("Invalid time range: {0}~{1} seconds")]
    InvalidTimeRange(TimeSec, TimeSec),

    #[error("Segment not found: {0}")]
    SegmentNotFound(usize),

    #[error("Caption parse error: {0}")]
    CaptionParse(#[from] ParseError),

    // =========================================================================
    // General Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;
