//! Accept/reject actions - the interviewer's arbitration of a reservation
//!
//! Both transitions are terminal. Accept spawns the interview session inside
//! the same transaction so an accepted reservation can never exist without
//! its session; reject frees the claimed seat the same way.

use tracing::info;

use crate::common::auth::Actor;
use crate::common::error::DomainError;
use crate::common::ReservationId;
use crate::domains::booking::models::{Reservation, ReservationStatus};
use crate::domains::scheduling::models::Slot;
use crate::domains::sessions::factory::create_session;
use crate::domains::sessions::models::Session;
use crate::kernel::{BookingEvent, ServerDeps};

/// The accepted reservation and the session it materialized.
#[derive(Debug)]
pub struct AcceptedReservation {
    pub reservation: Reservation,
    pub session: Session,
}

/// Load a reservation and check the caller may respond to it.
async fn respondable(
    actor: &Actor,
    reservation_id: ReservationId,
    deps: &ServerDeps,
) -> Result<Reservation, DomainError> {
    actor.require_interviewer()?;

    let reservation = Reservation::find_by_id(reservation_id, &deps.db_pool)
        .await?
        .ok_or(DomainError::not_found("reservation"))?;
    actor.require_owner(reservation.interviewer_id, "reservation")?;

    if reservation.status != ReservationStatus::Pending {
        return Err(DomainError::conflict("reservation is not pending"));
    }
    Ok(reservation)
}

/// Accept a pending reservation and materialize its session.
///
/// The seat stays consumed. The pending-only guard is re-applied as part of
/// the UPDATE itself, so two concurrent responses resolve to one winner and
/// one Conflict.
pub async fn accept_reservation(
    actor: &Actor,
    reservation_id: ReservationId,
    deps: &ServerDeps,
) -> Result<AcceptedReservation, DomainError> {
    let _ = respondable(actor, reservation_id, deps).await?;

    let mut tx = deps.db_pool.begin().await?;

    let reservation = Reservation::mark_accepted(reservation_id, actor.id, &mut tx)
        .await?
        .ok_or_else(|| DomainError::conflict("reservation is not pending"))?;

    let session = create_session(&reservation, &mut tx).await?;

    tx.commit().await?;

    info!(
        "Reservation {} accepted, session {} scheduled for {}",
        reservation.id, session.id, session.date
    );

    deps.notify(BookingEvent::ReservationAccepted {
        reservation_id: reservation.id,
        candidate_id: reservation.candidate_id,
        session_id: session.id,
    })
    .await;

    Ok(AcceptedReservation {
        reservation,
        session,
    })
}

/// Reject a pending reservation and release its seat.
pub async fn reject_reservation(
    actor: &Actor,
    reservation_id: ReservationId,
    reason: Option<String>,
    deps: &ServerDeps,
) -> Result<Reservation, DomainError> {
    let _ = respondable(actor, reservation_id, deps).await?;

    let mut tx = deps.db_pool.begin().await?;

    let reservation = Reservation::mark_rejected(reservation_id, actor.id, reason.as_deref(), &mut tx)
        .await?
        .ok_or_else(|| DomainError::conflict("reservation is not pending"))?;

    // Every pending reservation holds exactly one seat, so the conditional
    // decrement must find one to release.
    Slot::release_seat(reservation.slot_id, &mut tx)
        .await?
        .ok_or_else(|| {
            DomainError::invariant(format!(
                "slot {} had no seat to release for reservation {}",
                reservation.slot_id, reservation.id
            ))
        })?;

    tx.commit().await?;

    info!("Reservation {} rejected", reservation.id);

    deps.notify(BookingEvent::ReservationRejected {
        reservation_id: reservation.id,
        candidate_id: reservation.candidate_id,
    })
    .await;

    Ok(reservation)
}
