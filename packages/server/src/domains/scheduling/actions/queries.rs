//! Scheduling query actions
//!
//! Read paths consumed by the presentation layer. No auth beyond what the
//! filter itself encodes; slot listings are public to authenticated users.

use crate::common::error::DomainError;
use crate::common::ScheduleId;
use crate::domains::scheduling::models::{Schedule, Slot, SlotFilter};
use crate::kernel::ServerDeps;

/// List slots matching the filter, ordered by date and start time.
pub async fn list_slots(filter: &SlotFilter, deps: &ServerDeps) -> Result<Vec<Slot>, DomainError> {
    Ok(Slot::list(filter, &deps.db_pool).await?)
}

/// A schedule with its current slots.
pub async fn get_schedule(
    schedule_id: ScheduleId,
    deps: &ServerDeps,
) -> Result<(Schedule, Vec<Slot>), DomainError> {
    let schedule = Schedule::find_by_id(schedule_id, &deps.db_pool)
        .await?
        .ok_or(DomainError::not_found("schedule"))?;
    let slots = Slot::find_for_schedule(schedule_id, &deps.db_pool).await?;
    Ok((schedule, slots))
}
