//! Create schedule action - declares availability and derives its slots

use tracing::{debug, info};

use crate::common::auth::Actor;
use crate::common::error::DomainError;
use crate::common::time::time_of_minutes;
use crate::domains::scheduling::models::{CreateScheduleParams, NewSlot, Schedule, Slot};
use crate::domains::scheduling::slots::slot_ranges;
use crate::domains::scheduling::validate;
use crate::kernel::ServerDeps;

/// A freshly created schedule with its generated slots.
#[derive(Debug)]
pub struct CreatedSchedule {
    pub schedule: Schedule,
    pub slots: Vec<Slot>,
}

/// Declare an availability window and derive its bookable slots.
///
/// The window is validated up front (duration 15-180 minutes, break 0-60,
/// end after start, date not in the past) and rejected with Conflict if the
/// interviewer already has an active schedule on that date. Schedule and
/// slots are inserted in one transaction; every generated slot starts
/// available with a single seat.
pub async fn create_schedule(
    actor: &Actor,
    params: CreateScheduleParams,
    deps: &ServerDeps,
) -> Result<CreatedSchedule, DomainError> {
    let owner_id = actor.require_interviewer()?;

    validate::require_future_or_today(params.date)?;
    let window = validate::validated_window(
        params.start_time,
        params.end_time,
        params.duration_minutes,
        params.break_minutes,
    )?;

    if Schedule::find_active_for_owner_date(owner_id, params.date, &deps.db_pool)
        .await?
        .is_some()
    {
        return Err(DomainError::conflict(
            "an active schedule already exists for this date",
        ));
    }

    let mut tx = deps.db_pool.begin().await?;

    // The pre-check above can race another create; the partial unique index
    // on (owner_id, date) decides the loser here.
    let schedule = Schedule::insert(owner_id, &params, &mut tx)
        .await
        .map_err(|e| {
            DomainError::unique_as_conflict(e, "an active schedule already exists for this date")
        })?;

    let mut slots = Vec::new();
    for range in slot_ranges(window) {
        let new = NewSlot::builder()
            .schedule_id(schedule.id)
            .owner_id(owner_id)
            .date(schedule.date)
            .start_time(time_of_minutes(range.start)?)
            .end_time(time_of_minutes(range.end)?)
            .build();
        slots.push(Slot::insert(&new, &mut tx).await?);
    }

    tx.commit().await?;

    debug!(
        "Derived {} slots for window {}-{}",
        slots.len(),
        schedule.start_time,
        schedule.end_time
    );
    info!(
        "Schedule {} created for interviewer {} on {}",
        schedule.id, owner_id, schedule.date
    );

    Ok(CreatedSchedule { schedule, slots })
}
