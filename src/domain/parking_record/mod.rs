//! Parking record (session) aggregate

pub mod model;
pub mod repository;

pub use model::{FeeSchedule, ParkingRecord};
pub use repository::ParkingRecordRepository;
