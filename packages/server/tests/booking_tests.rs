//! Integration tests for the reservation state machine.

mod common;

use std::sync::Arc;

use crate::common::{
    create_candidate, create_interviewer, create_two_slot_schedule, widen_slot_capacity,
    TestHarness,
};
use scheduling_core::common::{DomainError, ReservationId, SlotId};
use scheduling_core::domains::booking::actions::{
    accept_reservation, get_reservation, list_reservations, reject_reservation, reserve_slot,
};
use scheduling_core::domains::booking::models::{Reservation, ReservationFilter, ReservationStatus};
use scheduling_core::domains::scheduling::models::{Slot, SlotStatus};
use scheduling_core::kernel::test_dependencies::{FailingNotificationService, SpyNotificationService};
use scheduling_core::kernel::{BookingEvent, ServerDeps};
use test_context::test_context;

// =============================================================================
// Reserve
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn reserve_claims_a_seat(ctx: &TestHarness) {
    let deps = ctx.deps();
    let (interviewer, created) = create_two_slot_schedule(&ctx.db_pool, &deps).await.unwrap();
    let candidate = create_candidate(&ctx.db_pool).await.unwrap();

    let reserved = reserve_slot(
        &candidate,
        created.slots[0].id,
        Some("Looking forward to it".to_string()),
        &deps,
    )
    .await
    .unwrap();

    assert_eq!(reserved.reservation.status, ReservationStatus::Pending);
    assert_eq!(reserved.reservation.candidate_id, candidate.id);
    assert_eq!(reserved.reservation.interviewer_id, interviewer.id);
    assert_eq!(reserved.reservation.note.as_deref(), Some("Looking forward to it"));

    // 1/1 seat consumed on a single-capacity slot
    assert_eq!(reserved.slot.current_count, 1);
    assert_eq!(reserved.slot.status, SlotStatus::Booked);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn reserve_rejects_unknown_slot(ctx: &TestHarness) {
    let deps = ctx.deps();
    let candidate = create_candidate(&ctx.db_pool).await.unwrap();

    let err = reserve_slot(&candidate, SlotId::new(), None, &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn reserve_rejects_booked_slot(ctx: &TestHarness) {
    let deps = ctx.deps();
    let (_, created) = create_two_slot_schedule(&ctx.db_pool, &deps).await.unwrap();
    let first = create_candidate(&ctx.db_pool).await.unwrap();
    let second = create_candidate(&ctx.db_pool).await.unwrap();

    reserve_slot(&first, created.slots[0].id, None, &deps)
        .await
        .unwrap();

    let err = reserve_slot(&second, created.slots[0].id, None, &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn reserve_requires_candidate_role(ctx: &TestHarness) {
    let deps = ctx.deps();
    let (interviewer, created) = create_two_slot_schedule(&ctx.db_pool, &deps).await.unwrap();

    let err = reserve_slot(&interviewer, created.slots[0].id, None, &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
}

/// One active engagement per (candidate, interviewer): holding a pending
/// reservation on one slot blocks booking another slot of the same
/// interviewer, while a different interviewer's slot stays bookable.
#[test_context(TestHarness)]
#[tokio::test]
async fn reserve_enforces_single_active_engagement(ctx: &TestHarness) {
    let deps = ctx.deps();
    let (_, created) = create_two_slot_schedule(&ctx.db_pool, &deps).await.unwrap();
    let candidate = create_candidate(&ctx.db_pool).await.unwrap();

    reserve_slot(&candidate, created.slots[0].id, None, &deps)
        .await
        .unwrap();

    let err = reserve_slot(&candidate, created.slots[1].id, None, &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    let (_, other) = create_two_slot_schedule(&ctx.db_pool, &deps).await.unwrap();
    reserve_slot(&candidate, other.slots[0].id, None, &deps)
        .await
        .unwrap();
}

// =============================================================================
// Reject and re-book
// =============================================================================

/// Rejection is terminal for the record but frees the seat: the slot goes
/// back to available and the same candidate may book it again.
#[test_context(TestHarness)]
#[tokio::test]
async fn reject_frees_seat_and_allows_rebooking(ctx: &TestHarness) {
    let deps = ctx.deps();
    let (interviewer, created) = create_two_slot_schedule(&ctx.db_pool, &deps).await.unwrap();
    let candidate = create_candidate(&ctx.db_pool).await.unwrap();
    let slot_id = created.slots[0].id;

    let reserved = reserve_slot(&candidate, slot_id, None, &deps).await.unwrap();

    let rejected = reject_reservation(
        &interviewer,
        reserved.reservation.id,
        Some("time conflict".to_string()),
        &deps,
    )
    .await
    .unwrap();

    assert_eq!(rejected.status, ReservationStatus::Rejected);
    assert_eq!(rejected.rejection_reason.as_deref(), Some("time conflict"));
    assert!(rejected.responded_at.is_some());
    assert_eq!(rejected.responded_by, Some(interviewer.id));

    let slot = Slot::find_by_id(slot_id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(slot.current_count, 0);
    assert_eq!(slot.status, SlotStatus::Available);

    // Re-booking purges the rejected record and succeeds
    let rebooked = reserve_slot(&candidate, slot_id, None, &deps).await.unwrap();
    assert_eq!(rebooked.reservation.status, ReservationStatus::Pending);
    assert_ne!(rebooked.reservation.id, reserved.reservation.id);

    let old = Reservation::find_by_id(reserved.reservation.id, &ctx.db_pool)
        .await
        .unwrap();
    assert!(old.is_none(), "rejected record should be purged on re-book");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn respond_guards(ctx: &TestHarness) {
    let deps = ctx.deps();
    let (interviewer, created) = create_two_slot_schedule(&ctx.db_pool, &deps).await.unwrap();
    let candidate = create_candidate(&ctx.db_pool).await.unwrap();

    let reserved = reserve_slot(&candidate, created.slots[0].id, None, &deps)
        .await
        .unwrap();
    let reservation_id = reserved.reservation.id;

    // Unknown reservation
    let err = accept_reservation(&interviewer, ReservationId::new(), &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));

    // Another interviewer may not respond
    let other = create_interviewer(&ctx.db_pool).await.unwrap();
    let err = accept_reservation(&other, reservation_id, &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    // The candidate may not respond at all
    let err = reject_reservation(&candidate, reservation_id, None, &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    // A terminal reservation cannot be responded to again
    reject_reservation(&interviewer, reservation_id, None, &deps)
        .await
        .unwrap();
    let err = accept_reservation(&interviewer, reservation_id, &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    let rejected = get_reservation(reservation_id, &deps).await.unwrap();
    assert_eq!(rejected.status, ReservationStatus::Rejected);
}

// =============================================================================
// Multi-seat capacity counting
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn capacity_counting_on_multi_seat_slot(ctx: &TestHarness) {
    let deps = ctx.deps();
    let (interviewer, created) = create_two_slot_schedule(&ctx.db_pool, &deps).await.unwrap();
    let slot_id = created.slots[0].id;
    widen_slot_capacity(&ctx.db_pool, slot_id, 3).await.unwrap();

    let mut reservations = Vec::new();
    for _ in 0..2 {
        let candidate = create_candidate(&ctx.db_pool).await.unwrap();
        reservations.push(reserve_slot(&candidate, slot_id, None, &deps).await.unwrap());
    }

    // 2/3: partially occupied
    assert_eq!(reservations[1].slot.current_count, 2);
    assert_eq!(reservations[1].slot.status, SlotStatus::Pending);

    let candidate = create_candidate(&ctx.db_pool).await.unwrap();
    let full = reserve_slot(&candidate, slot_id, None, &deps).await.unwrap();
    assert_eq!(full.slot.current_count, 3);
    assert_eq!(full.slot.status, SlotStatus::Booked);

    // Rejecting one occupant drops the slot back to partially occupied
    reject_reservation(&interviewer, full.reservation.id, None, &deps)
        .await
        .unwrap();
    let slot = Slot::find_by_id(slot_id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(slot.current_count, 2);
    assert_eq!(slot.status, SlotStatus::Pending);
}

// =============================================================================
// Queries and notifications
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn list_reservations_filters_by_party_and_status(ctx: &TestHarness) {
    let deps = ctx.deps();
    let (interviewer, created) = create_two_slot_schedule(&ctx.db_pool, &deps).await.unwrap();
    let candidate = create_candidate(&ctx.db_pool).await.unwrap();

    let reserved = reserve_slot(&candidate, created.slots[0].id, None, &deps)
        .await
        .unwrap();

    let pending = list_reservations(
        &ReservationFilter {
            interviewer_id: Some(interviewer.id),
            status: Some(ReservationStatus::Pending),
            ..Default::default()
        },
        &deps,
    )
    .await
    .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, reserved.reservation.id);

    let none = list_reservations(
        &ReservationFilter {
            candidate_id: Some(candidate.id),
            status: Some(ReservationStatus::Accepted),
            ..Default::default()
        },
        &deps,
    )
    .await
    .unwrap();
    assert!(none.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn booking_transitions_are_published(ctx: &TestHarness) {
    let spy = Arc::new(SpyNotificationService::new());
    let deps = ServerDeps::with_notifications(ctx.db_pool.clone(), spy.clone());

    let (interviewer, created) = create_two_slot_schedule(&ctx.db_pool, &deps).await.unwrap();
    let candidate = create_candidate(&ctx.db_pool).await.unwrap();

    let reserved = reserve_slot(&candidate, created.slots[0].id, None, &deps)
        .await
        .unwrap();
    reject_reservation(&interviewer, reserved.reservation.id, None, &deps)
        .await
        .unwrap();

    let events = spy.published();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        BookingEvent::ReservationRequested {
            reservation_id: reserved.reservation.id,
            interviewer_id: interviewer.id,
        }
    );
    assert_eq!(
        events[1],
        BookingEvent::ReservationRejected {
            reservation_id: reserved.reservation.id,
            candidate_id: candidate.id,
        }
    );
}

/// Notification delivery is fire-and-forget: a broken transport never fails
/// the booking itself.
#[test_context(TestHarness)]
#[tokio::test]
async fn notification_failure_does_not_fail_booking(ctx: &TestHarness) {
    let deps = ServerDeps::with_notifications(
        ctx.db_pool.clone(),
        Arc::new(FailingNotificationService),
    );

    let (_, created) = create_two_slot_schedule(&ctx.db_pool, &deps).await.unwrap();
    let candidate = create_candidate(&ctx.db_pool).await.unwrap();

    let reserved = reserve_slot(&candidate, created.slots[0].id, None, &deps).await;
    assert!(reserved.is_ok());
}
