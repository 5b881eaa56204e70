// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Business rules
// (like "one active engagement per interviewer") live in domain actions that
// use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseNotificationService)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{ReservationId, SessionId, UserId};

// =============================================================================
// Notification Service Trait (Infrastructure)
// =============================================================================

/// A booking-lifecycle transition worth telling the outside world about.
///
/// Delivery (push, email, websocket) is another service's problem; the engine
/// only emits these fire-and-forget after the owning transaction commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingEvent {
    ReservationRequested {
        reservation_id: ReservationId,
        interviewer_id: UserId,
    },
    ReservationAccepted {
        reservation_id: ReservationId,
        candidate_id: UserId,
        session_id: SessionId,
    },
    ReservationRejected {
        reservation_id: ReservationId,
        candidate_id: UserId,
    },
}

#[async_trait]
pub trait BaseNotificationService: Send + Sync {
    /// Deliver a booking event to interested parties.
    async fn publish(&self, event: BookingEvent) -> Result<()>;
}

/// Default implementation that drops every event on the floor.
pub struct NoopNotificationService;

#[async_trait]
impl BaseNotificationService for NoopNotificationService {
    async fn publish(&self, _event: BookingEvent) -> Result<()> {
        Ok(())
    }
}
