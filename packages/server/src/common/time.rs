//! Minutes-since-midnight conversions.
//!
//! Slot generation works on plain minute offsets rather than `NaiveTime`
//! values: the arithmetic stays integer-only and boundary cases (midnight,
//! exact window end) need no string parsing or time-of-day edge handling.
//! Conversion back to `NaiveTime` happens only at the persistence boundary.

use chrono::{NaiveTime, Timelike};

use crate::common::error::DomainError;

pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Minute offset from midnight for a time of day. Seconds are truncated.
pub fn minutes_of(time: NaiveTime) -> i32 {
    (time.hour() * 60 + time.minute()) as i32
}

/// Time of day for a minute offset from midnight.
///
/// Fails with `Invariant` for offsets outside [0, 1440); generated slot
/// ranges always stay inside their parent window, so a hit here means the
/// generator itself is broken.
pub fn time_of_minutes(minutes: i32) -> Result<NaiveTime, DomainError> {
    if !(0..MINUTES_PER_DAY).contains(&minutes) {
        return Err(DomainError::invariant(format!(
            "minute offset {minutes} outside a single day"
        )));
    }
    NaiveTime::from_hms_opt(minutes as u32 / 60, minutes as u32 % 60, 0).ok_or_else(|| {
        DomainError::invariant(format!("minute offset {minutes} is not a valid time"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let nine_thirty = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(minutes_of(nine_thirty), 570);
        assert_eq!(time_of_minutes(570).unwrap(), nine_thirty);
    }

    #[test]
    fn test_midnight_boundaries() {
        assert_eq!(minutes_of(NaiveTime::from_hms_opt(0, 0, 0).unwrap()), 0);
        assert_eq!(
            time_of_minutes(MINUTES_PER_DAY - 1).unwrap(),
            NaiveTime::from_hms_opt(23, 59, 0).unwrap()
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(time_of_minutes(-1).is_err());
        assert!(time_of_minutes(MINUTES_PER_DAY).is_err());
    }

    #[test]
    fn test_seconds_truncated() {
        let with_seconds = NaiveTime::from_hms_opt(10, 15, 45).unwrap();
        assert_eq!(minutes_of(with_seconds), 615);
    }
}
