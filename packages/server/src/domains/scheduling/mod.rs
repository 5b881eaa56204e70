// Scheduling domain: availability windows and the slots derived from them.

pub mod actions;
pub mod models;
pub mod slots;
pub mod validate;
