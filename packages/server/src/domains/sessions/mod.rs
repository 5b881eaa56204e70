// Sessions domain: the interview materialized from an accepted reservation.
//
// Only creation lives in core scope; start/complete/cancel transitions
// belong to the session-lifecycle service.

pub mod factory;
pub mod models;
pub mod queries;
