//! Payments module — explicit payment settlement and payment queries

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
