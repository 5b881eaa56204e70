pub mod reservation;

pub use reservation::{Reservation, ReservationFilter, ReservationStatus};
