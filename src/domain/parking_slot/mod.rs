//! Parking slot aggregate

pub mod model;
pub mod repository;

pub use model::{ParkingSlot, SlotStatus};
pub use repository::ParkingSlotRepository;
