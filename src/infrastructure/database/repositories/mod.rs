//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod car_repository;
pub mod parking_record_repository;
pub mod parking_slot_repository;
pub mod payment_repository;
pub mod repository_provider;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use tracing::error;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    error!(error = %e, "database operation failed");
    DomainError::Storage(e.to_string())
}
