pub mod airline;
pub mod events;
