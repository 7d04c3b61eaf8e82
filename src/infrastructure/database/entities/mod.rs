//! Database entities module

pub mod car;
pub mod parking_record;
pub mod parking_slot;
pub mod payment;
pub mod user;

pub use car::Entity as Car;
pub use parking_record::Entity as ParkingRecord;
pub use parking_slot::Entity as ParkingSlot;
pub use payment::Entity as Payment;
pub use user::Entity as User;
