//! Server dependencies for domain actions (using traits for testability)
//!
//! The central dependency container injected into every action. The pool's
//! connect/disconnect lifecycle belongs to the process entry point; actions
//! receive an already-connected handle and never manage it.

use sqlx::PgPool;
use std::sync::Arc;
use tracing::warn;

use crate::kernel::traits::{BaseNotificationService, BookingEvent, NoopNotificationService};

/// Dependencies accessible to domain actions.
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub notifications: Arc<dyn BaseNotificationService>,
}

impl ServerDeps {
    /// Production wiring with no notification fan-out.
    pub fn new(db_pool: PgPool) -> Self {
        Self {
            db_pool,
            notifications: Arc::new(NoopNotificationService),
        }
    }

    pub fn with_notifications(
        db_pool: PgPool,
        notifications: Arc<dyn BaseNotificationService>,
    ) -> Self {
        Self {
            db_pool,
            notifications,
        }
    }

    /// Publish a booking event, fire-and-forget.
    ///
    /// Called after the owning transaction has committed; a delivery failure
    /// must never fail the booking operation itself.
    pub async fn notify(&self, event: BookingEvent) {
        if let Err(e) = self.notifications.publish(event).await {
            warn!("Failed to publish booking event: {e}");
        }
    }
}
