pub mod queries;
pub mod reserve;
pub mod respond;

pub use queries::{get_reservation, list_reservations};
pub use reserve::{reserve_slot, ReservedSlot};
pub use respond::{accept_reservation, reject_reservation, AcceptedReservation};
