//! SubRip Import and Export
//!
//! Transcription results arrive either as JSON segment lists or as SRT files.
//! Export writes the laid-out text (same formatter as the preview) so the
//! SRT lines match what the viewer saw.
//!
//! # Example
//!
//! ```rust,ignore
//! use subcue_lib::core::captions::{parse_srt, export_srt, StyleConfig};
//!
//! let segments = parse_srt(&std::fs::read_to_string("talk.srt")?)?;
//! let srt = export_srt(&segments, &StyleConfig::default());
//! ```

use std::path::Path;

use thiserror::Error;

use super::{Segment, StyleConfig};
use crate::core::text::{format_text, FormatOptions};
use crate::core::CoreResult;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during SRT parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Invalid timestamp format
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    /// Invalid cue format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Missing required data
    #[error("Missing data: {0}")]
    MissingData(String),
    /// Unexpected end of input
    #[error("Unexpected end of input")]
    UnexpectedEnd,
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses SRT (SubRip) content into segments
///
/// ```text
/// 1
/// 00:00:01,000 --> 00:00:04,000
/// First caption text
///
/// 2
/// 00:00:05,500 --> 00:00:08,000
/// Second caption text
/// with multiple lines
/// ```
pub fn parse_srt(content: &str) -> Result<Vec<Segment>, ParseError> {
    let content = content.trim_start_matches('\u{feff}');
    let mut segments = Vec::new();
    let mut lines = content.lines().peekable();

    loop {
        while lines.peek().is_some_and(|l| l.trim().is_empty()) {
            lines.next();
        }

        let Some(first) = lines.next() else {
            break;
        };

        // The cue number is optional in practice; accept a bare timing line.
        let timing_line = if first.contains("-->") {
            first
        } else {
            lines.next().ok_or(ParseError::UnexpectedEnd)?
        };
        let (start, end) = parse_timing_line(timing_line)?;

        let mut text_lines = Vec::new();
        while let Some(line) = lines.next_if(|l| !l.trim().is_empty()) {
            text_lines.push(line.trim_end());
        }

        if text_lines.is_empty() {
            return Err(ParseError::MissingData(format!(
                "cue text after '{}'",
                timing_line.trim()
            )));
        }

        segments.push(Segment::new(start, end, text_lines.join("\n")));
    }

    Ok(segments)
}

/// Parses a timing line (e.g., "00:00:01,000 --> 00:00:04,000")
fn parse_timing_line(line: &str) -> Result<(f64, f64), ParseError> {
    let Some((start, end)) = line.split_once("-->") else {
        return Err(ParseError::InvalidFormat(format!(
            "Expected 'start --> end' format: {}",
            line
        )));
    };

    // Position hints may trail the end timestamp ("00:00:04,000 X1:10 ...").
    let end = end.split_whitespace().next().unwrap_or_default();

    Ok((parse_timestamp(start.trim())?, parse_timestamp(end)?))
}

/// Parses an SRT timestamp (e.g., "00:01:23,456") into seconds
fn parse_timestamp(ts: &str) -> Result<f64, ParseError> {
    let normalized = ts.replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();

    if parts.len() != 3 {
        return Err(ParseError::InvalidTimestamp(ts.to_string()));
    }

    let field = |s: &str| -> Result<f64, ParseError> {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| ParseError::InvalidTimestamp(ts.to_string()))
    };

    Ok(field(parts[0])? * 3600.0 + field(parts[1])? * 60.0 + field(parts[2])?)
}

/// Encoding of a segment list on disk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentFormat {
    /// SubRip
    Srt,
    /// JSON array of `{start, end, text}` objects
    Json,
}

impl SegmentFormat {
    /// `.srt` files are SubRip; anything else is read as JSON
    pub fn from_path(path: &Path) -> Self {
        let is_srt = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("srt"));
        if is_srt {
            Self::Srt
        } else {
            Self::Json
        }
    }
}

/// Parses a segment list in the given format
pub fn parse_segments(content: &str, format: SegmentFormat) -> CoreResult<Vec<Segment>> {
    let segments = match format {
        SegmentFormat::Srt => parse_srt(content)?,
        SegmentFormat::Json => serde_json::from_str(content.trim_start_matches('\u{feff}'))?,
    };
    Ok(segments)
}

// =============================================================================
// Export
// =============================================================================

/// Exports segments to SRT, laying out each cue with the style's formatting options
pub fn export_srt(segments: &[Segment], style: &StyleConfig) -> String {
    let options = FormatOptions::from(style);
    let mut output = String::new();
    let mut cue = 0;

    for segment in segments {
        let display = format_text(&segment.text, &options);
        if display.is_empty() {
            continue;
        }
        cue += 1;

        output.push_str(&format!("{}\n", cue));
        output.push_str(&format!(
            "{} --> {}\n",
            format_srt_timestamp(segment.start),
            format_srt_timestamp(segment.end)
        ));
        output.push_str(&display.lines.join("\n"));
        output.push_str("\n\n");
    }

    output
}

/// Formats seconds as SRT timestamp (00:00:00,000)
pub fn format_srt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;

    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, ms)
}

// =============================================================================
// Tests
// =============================================================================
