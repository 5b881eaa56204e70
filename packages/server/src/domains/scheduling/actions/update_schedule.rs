//! Update schedule action - edits the window and regenerates its slots

use tracing::info;

use crate::common::auth::Actor;
use crate::common::error::DomainError;
use crate::common::time::time_of_minutes;
use crate::common::ScheduleId;
use crate::domains::scheduling::models::{
    NewSlot, Schedule, Slot, SlotStatus, UpdateScheduleParams,
};
use crate::domains::scheduling::slots::slot_ranges;
use crate::domains::scheduling::validate;
use crate::kernel::ServerDeps;

#[derive(Debug)]
pub struct UpdatedSchedule {
    pub schedule: Schedule,
    pub slots: Vec<Slot>,
}

/// Patch a schedule. Title-only patches apply directly; any change to the
/// window fields deletes the still-available slots and regenerates them from
/// the new window, and is refused with Conflict while any slot of the
/// schedule holds a reservation.
pub async fn update_schedule(
    actor: &Actor,
    schedule_id: ScheduleId,
    patch: UpdateScheduleParams,
    deps: &ServerDeps,
) -> Result<UpdatedSchedule, DomainError> {
    actor.require_interviewer()?;

    let schedule = Schedule::find_by_id(schedule_id, &deps.db_pool)
        .await?
        .ok_or(DomainError::not_found("schedule"))?;
    actor.require_owner(schedule.owner_id, "schedule")?;

    if !patch.touches_window() {
        let mut tx = deps.db_pool.begin().await?;
        let schedule = Schedule::apply_patch(schedule_id, &patch, &mut tx).await?;
        tx.commit().await?;
        let slots = Slot::find_for_schedule(schedule_id, &deps.db_pool).await?;
        return Ok(UpdatedSchedule { schedule, slots });
    }

    // Validate the effective window before touching anything.
    let window = validate::validated_window(
        patch.start_time.unwrap_or(schedule.start_time),
        patch.end_time.unwrap_or(schedule.end_time),
        patch.duration_minutes.unwrap_or(schedule.duration_minutes),
        patch.break_minutes.unwrap_or(schedule.break_minutes),
    )?;

    let mut tx = deps.db_pool.begin().await?;

    // Row-lock the slots so a concurrent reserve cannot claim one while we
    // decide whether the window may still change.
    let current = Slot::lock_for_schedule(schedule_id, &mut tx).await?;
    if current.iter().any(|s| s.status != SlotStatus::Available) {
        return Err(DomainError::conflict(
            "cannot modify a window with reserved or booked slots",
        ));
    }

    let schedule = Schedule::apply_patch(schedule_id, &patch, &mut tx).await?;
    Slot::delete_available_for_schedule(schedule_id, &mut tx).await?;

    let mut slots = Vec::new();
    for range in slot_ranges(window) {
        let new = NewSlot::builder()
            .schedule_id(schedule.id)
            .owner_id(schedule.owner_id)
            .date(schedule.date)
            .start_time(time_of_minutes(range.start)?)
            .end_time(time_of_minutes(range.end)?)
            .build();
        slots.push(Slot::insert(&new, &mut tx).await?);
    }

    tx.commit().await?;

    info!(
        "Schedule {} window updated, {} slots regenerated",
        schedule.id,
        slots.len()
    );

    Ok(UpdatedSchedule { schedule, slots })
}
