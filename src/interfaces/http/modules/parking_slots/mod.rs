//! Parking slots module — slot CRUD and the status transition endpoint

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
