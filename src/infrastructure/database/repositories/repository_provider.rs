//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::{
    CarRepository, ParkingRecordRepository, ParkingSlotRepository, PaymentRepository,
    UserRepository,
};

use super::car_repository::SeaOrmCarRepository;
use super::parking_record_repository::SeaOrmParkingRecordRepository;
use super::parking_slot_repository::SeaOrmParkingSlotRepository;
use super::payment_repository::SeaOrmPaymentRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let car = repos.cars().find_by_plate("RAD 123 A").await?;
/// let open = repos.parking_records().find_by_id(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    cars: SeaOrmCarRepository,
    parking_slots: SeaOrmParkingSlotRepository,
    parking_records: SeaOrmParkingRecordRepository,
    payments: SeaOrmPaymentRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            cars: SeaOrmCarRepository::new(db.clone()),
            parking_slots: SeaOrmParkingSlotRepository::new(db.clone()),
            parking_records: SeaOrmParkingRecordRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn cars(&self) -> &dyn CarRepository {
        &self.cars
    }

    fn parking_slots(&self) -> &dyn ParkingSlotRepository {
        &self.parking_slots
    }

    fn parking_records(&self) -> &dyn ParkingRecordRepository {
        &self.parking_records
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}
