//! Word Timing
//!
//! Karaoke timing by uniform slicing: a segment's duration is split evenly
//! across its words. Word boundaries are estimates, not transcription data.

use crate::core::captions::Segment;
use crate::core::TimeSec;

/// Index of the word spoken at `playback_time`.
///
/// `floor((time - start) / (duration / word_count))`, clamped to
/// `[0, word_count - 1]`. The index depends on time alone, so a backward
/// seek inside the segment moves it back.
///
/// Degenerate input keeps the previous index (clamped to the word count):
/// zero-length or non-finite segment timing, or a non-finite time.
pub fn current_word_index(
    segment: &Segment,
    word_count: usize,
    playback_time: TimeSec,
    previous_index: usize,
) -> usize {
    if word_count == 0 {
        return 0;
    }
    let last = word_count - 1;

    let duration = segment.duration();
    if !duration.is_finite() || duration <= 0.0 || !playback_time.is_finite() {
        return previous_index.min(last);
    }

    let word_duration = duration / word_count as f64;
    let relative = playback_time - segment.start;
    let index = (relative / word_duration).floor();

    if index <= 0.0 {
        0
    } else {
        (index as usize).min(last)
    }
}

/// Time slice `[start, end)` during which word `index` is current.
///
/// The last slice ends exactly at the segment end.
pub fn word_slice(segment: &Segment, word_count: usize, index: usize) -> Option<(TimeSec, TimeSec)> {
    if word_count == 0 || index >= word_count {
        return None;
    }

    let word_duration = segment.duration() / word_count as f64;
    let start = segment.start + index as f64 * word_duration;
    let end = if index + 1 == word_count {
        segment.end
    } else {
        segment.start + (index + 1) as f64 * word_duration
    };
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_seconds() -> Segment {
        Segment::new(0.0, 10.0, "one two three four five")
    }

    #[test]
    fn test_index_over_segment() {
        let seg = ten_seconds();
        assert_eq!(current_word_index(&seg, 5, 0.0, 0), 0);
        assert_eq!(current_word_index(&seg, 5, 1.99, 0), 0);
        assert_eq!(current_word_index(&seg, 5, 2.0, 0), 1);
        assert_eq!(current_word_index(&seg, 5, 9.9, 0), 4);
        assert_eq!(current_word_index(&seg, 5, 10.0, 0), 4);
    }

    #[test]
    fn test_index_is_clamped_outside_segment() {
        let seg = Segment::new(5.0, 7.0, "a b");
        assert_eq!(current_word_index(&seg, 2, 4.0, 1), 0);
        assert_eq!(current_word_index(&seg, 2, 99.0, 0), 1);
    }

    #[test]
    fn test_index_is_monotonic_for_forward_time() {
        let seg = Segment::new(1.25, 4.75, "w w w w w w w");
        let mut previous = 0;
        let mut t = seg.start;
        while t <= seg.end {
            let index = current_word_index(&seg, 7, t, previous);
            assert!(index >= previous, "t={t}");
            assert!(index < 7);
            previous = index;
            t += 0.01;
        }
        assert_eq!(previous, 6);
    }

    #[test]
    fn test_backward_seek_moves_index_back() {
        let seg = ten_seconds();
        let late = current_word_index(&seg, 5, 8.0, 0);
        assert_eq!(current_word_index(&seg, 5, 1.0, late), 0);
    }

    #[test]
    fn test_degenerate_inputs_keep_previous() {
        let zero = Segment::new(3.0, 3.0, "a b c");
        assert_eq!(current_word_index(&zero, 3, 3.0, 2), 2);
        assert_eq!(current_word_index(&zero, 3, 3.0, 9), 2);
        assert_eq!(current_word_index(&ten_seconds(), 5, f64::NAN, 3), 3);
        assert_eq!(current_word_index(&ten_seconds(), 0, 5.0, 3), 0);
    }

    #[test]
    fn test_word_slices_cover_segment() {
        let seg = Segment::new(1.0, 2.0, "a b c");
        assert_eq!(word_slice(&seg, 3, 0).map(|s| s.0), Some(1.0));
        assert_eq!(word_slice(&seg, 3, 2).map(|s| s.1), Some(2.0));
        assert!(word_slice(&seg, 3, 3).is_none());
        assert!(word_slice(&seg, 0, 0).is_none());

        for i in 0..2 {
            let (_, end) = word_slice(&seg, 3, i).unwrap();
            let (next_start, _) = word_slice(&seg, 3, i + 1).unwrap();
            assert_eq!(end, next_start);
        }
    }

    #[test]
    fn test_slice_start_agrees_with_index() {
        let seg = ten_seconds();
        for i in 0..5 {
            let (start, _) = word_slice(&seg, 5, i).unwrap();
            assert_eq!(current_word_index(&seg, 5, start, 0), i);
        }
    }
}
