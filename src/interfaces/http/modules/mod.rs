pub mod auth;
pub mod cars;
pub mod health;
pub mod parking_records;
pub mod parking_slots;
pub mod payments;
pub mod reports;
