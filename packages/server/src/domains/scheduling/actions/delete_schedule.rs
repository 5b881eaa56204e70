//! Delete schedule action

use tracing::info;

use crate::common::auth::Actor;
use crate::common::error::DomainError;
use crate::common::ScheduleId;
use crate::domains::scheduling::models::{Schedule, Slot, SlotStatus};
use crate::kernel::ServerDeps;

/// Delete a schedule and its slots.
///
/// Refused with Conflict while any slot holds a pending or booked
/// reservation; slots that have left the available state are historical
/// records and must outlive their schedule.
pub async fn delete_schedule(
    actor: &Actor,
    schedule_id: ScheduleId,
    deps: &ServerDeps,
) -> Result<(), DomainError> {
    actor.require_interviewer()?;

    let schedule = Schedule::find_by_id(schedule_id, &deps.db_pool)
        .await?
        .ok_or(DomainError::not_found("schedule"))?;
    actor.require_owner(schedule.owner_id, "schedule")?;

    let mut tx = deps.db_pool.begin().await?;

    let slots = Slot::lock_for_schedule(schedule_id, &mut tx).await?;
    if slots.iter().any(|s| s.status != SlotStatus::Available) {
        return Err(DomainError::conflict(
            "cannot delete a schedule with reserved or booked slots",
        ));
    }

    Slot::delete_available_for_schedule(schedule_id, &mut tx).await?;
    Schedule::delete(schedule_id, &mut tx).await?;

    tx.commit().await?;

    info!("Schedule {} deleted with {} slots", schedule_id, slots.len());

    Ok(())
}
