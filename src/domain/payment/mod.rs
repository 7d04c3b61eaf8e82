//! Payment aggregate

pub mod model;
pub mod repository;

pub use model::{Payment, PaymentMethod};
pub use repository::PaymentRepository;
