//! Booking query actions

use crate::common::error::DomainError;
use crate::common::ReservationId;
use crate::domains::booking::models::{Reservation, ReservationFilter};
use crate::kernel::ServerDeps;

/// List reservations matching the filter, oldest first. No ordering promise
/// beyond insertion order is made to responders.
pub async fn list_reservations(
    filter: &ReservationFilter,
    deps: &ServerDeps,
) -> Result<Vec<Reservation>, DomainError> {
    Ok(Reservation::list(filter, &deps.db_pool).await?)
}

pub async fn get_reservation(
    reservation_id: ReservationId,
    deps: &ServerDeps,
) -> Result<Reservation, DomainError> {
    Reservation::find_by_id(reservation_id, &deps.db_pool)
        .await?
        .ok_or(DomainError::not_found("reservation"))
}
