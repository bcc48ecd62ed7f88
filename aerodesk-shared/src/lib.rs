pub mod models;

pub use models::airline::{Airplane, BoardingPass, Flight, Passenger, Purchase, Seat, SeatType};
pub use models::events::{AllocationEvent, SkipReason};
