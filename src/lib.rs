//! # Parklot
//!
//! Parking lot management service: cars, slots, parking sessions,
//! payments and revenue reports behind a JWT-protected REST API.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, repository traits and the fee schedule
//! - **application**: Session lifecycle and reporting services
//! - **infrastructure**: SeaORM persistence, in-memory storage, crypto
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, Migrator, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
