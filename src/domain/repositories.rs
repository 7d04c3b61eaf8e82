//! Repository traits for the domain layer

use super::car::CarRepository;
use super::parking_record::ParkingRecordRepository;
use super::parking_slot::ParkingSlotRepository;
use super::payment::PaymentRepository;
use super::user::UserRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let slot = repos.parking_slots().find_by_number("A-01").await?;
///     let record = repos.parking_records().find_by_id(42).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn cars(&self) -> &dyn CarRepository;
    fn parking_slots(&self) -> &dyn ParkingSlotRepository;
    fn parking_records(&self) -> &dyn ParkingRecordRepository;
    fn payments(&self) -> &dyn PaymentRepository;
    fn users(&self) -> &dyn UserRepository;
}
