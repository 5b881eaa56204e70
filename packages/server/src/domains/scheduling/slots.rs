//! Slot derivation from an availability window.
//!
//! Pure and side-effect-free: no persistence, no randomness, no clock. The
//! same window always produces the same ranges, which is what makes slot
//! regeneration on schedule edits safe.

use serde::{Deserialize, Serialize};

/// An availability window in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub start: i32,
    pub end: i32,
    pub duration_minutes: i32,
    pub break_minutes: i32,
}

/// A half-open `[start, end)` slot range in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRange {
    pub start: i32,
    pub end: i32,
}

/// Iterator over the bookable ranges of a window.
///
/// Advances a cursor from the window start; each step emits a range of
/// exactly `duration_minutes` and skips `break_minutes` before the next.
/// A range that would cross the window end is discarded, never truncated,
/// so the tail remainder of a window simply goes unused.
#[derive(Debug, Clone)]
pub struct SlotSequence {
    cursor: i32,
    window: SlotWindow,
}

impl Iterator for SlotSequence {
    type Item = SlotRange;

    fn next(&mut self) -> Option<SlotRange> {
        let end = self.cursor.checked_add(self.window.duration_minutes)?;
        if end > self.window.end {
            return None;
        }
        let range = SlotRange {
            start: self.cursor,
            end,
        };
        self.cursor = end + self.window.break_minutes;
        Some(range)
    }
}

impl std::iter::FusedIterator for SlotSequence {}

/// The bookable ranges of `window`, in chronological order.
///
/// Empty when the duration does not fit the window at all. Restartable:
/// the returned sequence is `Clone` and every pass yields the same ranges.
pub fn slot_ranges(window: SlotWindow) -> SlotSequence {
    SlotSequence {
        cursor: window.start,
        window,
    }
}
