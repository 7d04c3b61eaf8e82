//! Core business entities, types and traits

pub mod car;
pub mod error;
pub mod parking_record;
pub mod parking_slot;
pub mod payment;
pub mod repositories;
pub mod user;

// Re-export commonly used types
pub use car::{Car, CarRepository};
pub use error::{DomainError, DomainResult};
pub use parking_record::{FeeSchedule, ParkingRecord, ParkingRecordRepository};
pub use parking_slot::{ParkingSlot, ParkingSlotRepository, SlotStatus};
pub use payment::{Payment, PaymentMethod, PaymentRepository};
pub use repositories::RepositoryProvider;
pub use user::{User, UserRepository, UserRole};
