//! Segment Data Model
//!
//! A segment is one timed utterance. Segments carry no identifier of their
//! own; the orchestrator tells them apart by their `(start, end)` pair.

use serde::{Deserialize, Serialize};

use crate::core::{CoreError, CoreResult, TimeSec};

/// A single subtitle utterance with text and timing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds
    pub start: TimeSec,
    /// End time in seconds
    pub end: TimeSec,
    /// Raw utterance text
    pub text: String,
}

impl Segment {
    /// Creates a new segment
    pub fn new(start: TimeSec, end: TimeSec, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Returns the duration of this segment in seconds
    pub fn duration(&self) -> TimeSec {
        self.end - self.start
    }

    /// Returns true if `time_sec` falls inside the segment, both ends inclusive
    pub fn contains(&self, time_sec: TimeSec) -> bool {
        time_sec >= self.start && time_sec <= self.end
    }

    /// Identity of this segment for change detection
    pub fn key(&self) -> SegmentKey {
        SegmentKey::new(self.start, self.end)
    }

    /// Checks the `start < end` invariant
    pub fn validate(&self) -> CoreResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() || self.start >= self.end {
            return Err(CoreError::InvalidTimeRange(self.start, self.end));
        }
        Ok(())
    }
}

/// Identity of a segment, derived from its timing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentKey {
    start_bits: u64,
    end_bits: u64,
}

impl SegmentKey {
    pub fn new(start: TimeSec, end: TimeSec) -> Self {
        Self {
            start_bits: start.to_bits(),
            end_bits: end.to_bits(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_contains_is_inclusive() {
        let seg = Segment::new(2.0, 5.0, "Test");

        assert!(!seg.contains(1.99));
        assert!(seg.contains(2.0));
        assert!(seg.contains(3.5));
        assert!(seg.contains(5.0));
        assert!(!seg.contains(5.01));
    }

    #[test]
    fn test_segment_duration() {
        assert_eq!(Segment::new(1.5, 4.5, "Test").duration(), 3.0);
    }

    #[test]
    fn test_segment_validate() {
        assert!(Segment::new(0.0, 1.0, "ok").validate().is_ok());
        assert!(Segment::new(1.0, 1.0, "zero").validate().is_err());
        assert!(Segment::new(2.0, 1.0, "reversed").validate().is_err());
        assert!(Segment::new(f64::NAN, 1.0, "nan").validate().is_err());
    }

    #[test]
    fn test_segment_key_tracks_timing_not_text() {
        let a = Segment::new(0.0, 2.0, "Hello");
        let b = Segment::new(0.0, 2.0, "Edited");
        let c = Segment::new(0.0, 2.5, "Hello");

        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn test_segment_deserializes_transcription_output() {
        // Transcription output carries extra fields such as per-word timings.
        let json = r#"{"start": 0.5, "end": 2.0, "text": " Hello there", "words": []}"#;
        let seg: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(seg.start, 0.5);
        assert_eq!(seg.text, " Hello there");
    }
}
