// Interview Scheduling & Booking Engine - API Core
//
// This crate turns an interviewer's declared availability into discrete
// bookable slots and drives the reservation lifecycle from creation through
// acceptance/rejection into a realized interview session.
//
// The presentation layer (REST/GraphQL) and the identity provider are
// external collaborators; this crate exposes domain actions only.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
