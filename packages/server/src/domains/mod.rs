// Business domains
pub mod booking;
pub mod scheduling;
pub mod sessions;
