//! Availability-window validation shared by schedule create and update.

use chrono::{NaiveDate, NaiveTime, Utc};

use crate::common::error::DomainError;
use crate::common::time::minutes_of;
use crate::domains::scheduling::slots::SlotWindow;

pub const MIN_DURATION_MINUTES: i32 = 15;
pub const MAX_DURATION_MINUTES: i32 = 180;
pub const MAX_BREAK_MINUTES: i32 = 60;

/// Validate a window's shape and return it in minutes since midnight.
///
/// Checks the field ranges and end > start; callers that create schedules
/// additionally reject past dates via [`require_future_or_today`].
pub fn validated_window(
    start_time: NaiveTime,
    end_time: NaiveTime,
    duration_minutes: i32,
    break_minutes: i32,
) -> Result<SlotWindow, DomainError> {
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration_minutes) {
        return Err(DomainError::validation(format!(
            "slot duration must be between {MIN_DURATION_MINUTES} and {MAX_DURATION_MINUTES} minutes"
        )));
    }
    if !(0..=MAX_BREAK_MINUTES).contains(&break_minutes) {
        return Err(DomainError::validation(format!(
            "break must be between 0 and {MAX_BREAK_MINUTES} minutes"
        )));
    }
    let start = minutes_of(start_time);
    let end = minutes_of(end_time);
    if end <= start {
        return Err(DomainError::validation(
            "end time must be after start time",
        ));
    }
    Ok(SlotWindow {
        start,
        end,
        duration_minutes,
        break_minutes,
    })
}

/// Reject availability declared for a date that has already passed.
pub fn require_future_or_today(date: NaiveDate) -> Result<(), DomainError> {
    if date < Utc::now().date_naive() {
        return Err(DomainError::validation(
            "schedule date must not be in the past",
        ));
    }
    Ok(())
}
