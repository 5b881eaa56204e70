//! Kernel module - infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use traits::{BaseNotificationService, BookingEvent, NoopNotificationService};
