//! Reserve slot action - the entry point of the booking state machine

use tracing::{debug, info};

use crate::common::auth::Actor;
use crate::common::error::DomainError;
use crate::common::SlotId;
use crate::domains::booking::models::Reservation;
use crate::domains::scheduling::models::{Slot, SlotStatus};
use crate::kernel::{BookingEvent, ServerDeps};

/// A pending reservation together with the slot state after the claim.
#[derive(Debug)]
pub struct ReservedSlot {
    pub reservation: Reservation,
    pub slot: Slot,
}

/// Book a seat on a slot for a candidate.
///
/// The whole operation is one transaction. The early status and engagement
/// checks give precise Conflict messages, but neither is the arbiter under
/// contention: the seat claim is a conditional increment that only the
/// winners of a race survive, and the partial unique index on active
/// (candidate, interviewer) pairs backstops the engagement rule. Either way
/// the loser's transaction rolls back whole; there is no partial booking.
pub async fn reserve_slot(
    actor: &Actor,
    slot_id: SlotId,
    note: Option<String>,
    deps: &ServerDeps,
) -> Result<ReservedSlot, DomainError> {
    let candidate_id = actor.require_candidate()?;

    let slot = Slot::find_by_id(slot_id, &deps.db_pool)
        .await?
        .ok_or(DomainError::not_found("slot"))?;

    if slot.status == SlotStatus::Booked {
        return Err(DomainError::conflict("slot is fully booked"));
    }

    if Reservation::find_active_for_pair(candidate_id, slot.owner_id, &deps.db_pool)
        .await?
        .is_some()
    {
        return Err(DomainError::conflict(
            "candidate already has an active reservation with this interviewer",
        ));
    }

    let mut tx = deps.db_pool.begin().await?;

    // A rejection is terminal for its record, not for the (candidate, slot)
    // pair: purge the old record so the uniqueness constraint lets the
    // candidate book this slot again.
    let purged = Reservation::purge_rejected(candidate_id, slot_id, &mut tx).await?;
    if purged > 0 {
        debug!(
            "Purged {} rejected reservation(s) for candidate {} on slot {}",
            purged, candidate_id, slot_id
        );
    }

    // Claim the seat before inserting the reservation: the conditional
    // update takes the slot's row lock, so a concurrent window edit cannot
    // delete the slot out from under the insert. A slot that vanished
    // between the read above and this claim matches zero rows and comes
    // back as a Conflict, not a foreign-key error.
    let slot = Slot::try_claim_seat(slot_id, &mut tx)
        .await?
        .ok_or_else(|| DomainError::conflict("slot is no longer available"))?;

    let reservation =
        Reservation::insert(candidate_id, slot_id, slot.owner_id, note.as_deref(), &mut tx)
            .await
            .map_err(|e| {
                DomainError::unique_as_conflict(
                    e,
                    "candidate already has an active reservation with this interviewer",
                )
            })?;

    tx.commit().await?;

    info!(
        "Reservation {} created: candidate {} on slot {} ({}/{})",
        reservation.id, candidate_id, slot_id, slot.current_count, slot.max_capacity
    );

    deps.notify(BookingEvent::ReservationRequested {
        reservation_id: reservation.id,
        interviewer_id: reservation.interviewer_id,
    })
    .await;

    Ok(ReservedSlot { reservation, slot })
}
