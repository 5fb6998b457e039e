//! Playback Timing
//!
//! Segment lookup by playback time and karaoke word timing.

mod karaoke;
mod locator;

pub use karaoke::{current_word_index, word_slice};
pub use locator::{audit_segments, locate};

use crate::core::TimeSec;

/// Seek capability of the playback surface
pub trait Seeker {
    fn seek(&mut self, time: TimeSec);
}

/// Records seek requests instead of moving a real player
#[derive(Clone, Debug, Default)]
pub struct RecordingSeeker {
    pub requests: Vec<TimeSec>,
}

impl Seeker for RecordingSeeker {
    fn seek(&mut self, time: TimeSec) {
        self.requests.push(time);
    }
}
