// Booking domain: the reservation state machine.

pub mod actions;
pub mod models;
