// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod error;
pub mod id;
pub mod time;

pub use auth::{Actor, Role};
pub use entity_ids::*;
pub use error::DomainError;
pub use id::{Id, V4, V7};
pub use time::{minutes_of, time_of_minutes, MINUTES_PER_DAY};
