//! Parking records module — session open/close/delete and the
//! completed-sessions report

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
