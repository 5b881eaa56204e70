//! Typed ID definitions for all domain entities.
//!
//! One alias per entity so IDs cannot be mixed up at compile time.

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (interviewers and candidates).
pub struct User;

/// Marker type for Schedule entities (availability windows).
pub struct Schedule;

/// Marker type for Slot entities (bookable time ranges).
pub struct Slot;

/// Marker type for Reservation entities (booking requests).
pub struct Reservation;

/// Marker type for Session entities (realized interviews).
pub struct Session;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for Schedule entities.
pub type ScheduleId = Id<Schedule>;

/// Typed ID for Slot entities.
pub type SlotId = Id<Slot>;

/// Typed ID for Reservation entities.
pub type ReservationId = Id<Reservation>;

/// Typed ID for Session entities.
pub type SessionId = Id<Session>;
