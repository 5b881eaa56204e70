// Mock implementations for testing
//
// Provides spy services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::kernel::traits::{BaseNotificationService, BookingEvent};

// =============================================================================
// Spy Notification Service
// =============================================================================

/// Records every published event for later assertions.
#[derive(Default)]
pub struct SpyNotificationService {
    events: Arc<Mutex<Vec<BookingEvent>>>,
}

impl SpyNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<BookingEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseNotificationService for SpyNotificationService {
    async fn publish(&self, event: BookingEvent) -> Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Fails every publish; used to prove delivery failures never fail bookings.
pub struct FailingNotificationService;

#[async_trait]
impl BaseNotificationService for FailingNotificationService {
    async fn publish(&self, _event: BookingEvent) -> Result<()> {
        anyhow::bail!("notification transport unavailable")
    }
}
