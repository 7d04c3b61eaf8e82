use async_trait::async_trait;

use super::model::Car;
use crate::domain::DomainResult;

#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Insert a new car. Fails with `Conflict` on a duplicate plate number.
    async fn save(&self, car: Car) -> DomainResult<Car>;
    async fn find_all(&self) -> DomainResult<Vec<Car>>;
    async fn find_by_plate(&self, plate_number: &str) -> DomainResult<Option<Car>>;
    async fn update(&self, car: Car) -> DomainResult<()>;
    async fn delete_by_plate(&self, plate_number: &str) -> DomainResult<()>;
}
