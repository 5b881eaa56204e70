pub mod create_schedule;
pub mod delete_schedule;
pub mod queries;
pub mod update_schedule;

pub use create_schedule::{create_schedule, CreatedSchedule};
pub use delete_schedule::delete_schedule;
pub use queries::{get_schedule, list_slots};
pub use update_schedule::{update_schedule, UpdatedSchedule};
