//! Segment Locator
//!
//! Finds the segment shown at a playback time.

use tracing::warn;

use crate::core::captions::Segment;
use crate::core::TimeSec;

/// Index of the segment active at `time`.
///
/// Both ends are inclusive. When segments overlap, the first one in
/// collection order wins. Gaps, and times before the first or after the
/// last segment, yield `None`.
pub fn locate(segments: &[Segment], time: TimeSec) -> Option<usize> {
    if !time.is_finite() {
        return None;
    }
    segments.iter().position(|segment| segment.contains(time))
}

/// Logs segments that break the ordering or `start < end` assumptions.
///
/// Such segments are kept; lookup stays first-match-wins.
/// Returns the number of problems found.
pub fn audit_segments(segments: &[Segment]) -> usize {
    let mut problems = 0;

    for (index, segment) in segments.iter().enumerate() {
        if let Err(e) = segment.validate() {
            warn!("Segment {} is invalid: {}", index, e);
            problems += 1;
        }
    }

    for (index, pair) in segments.windows(2).enumerate() {
        if pair[1].start < pair[0].start {
            warn!(
                "Segment {} starts before segment {} ({} < {})",
                index + 1,
                index,
                pair[1].start,
                pair[0].start
            );
            problems += 1;
        }
    }

    problems
}
