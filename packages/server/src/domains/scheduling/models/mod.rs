pub mod schedule;
pub mod slot;

pub use schedule::{CreateScheduleParams, Schedule, UpdateScheduleParams};
pub use slot::{NewSlot, Slot, SlotFilter, SlotStatus};
