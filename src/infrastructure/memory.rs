//! In-memory repositories for development and testing
//!
//! DashMap-backed implementations of every repository trait, wired into a
//! single [`InMemoryRepositoryProvider`]. Conditional updates (`try_occupy`,
//! `close`) rely on DashMap's per-entry locking for atomicity.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::{
    Car, CarRepository, DomainError, DomainResult, ParkingRecord, ParkingRecordRepository,
    ParkingSlot, ParkingSlotRepository, Payment, PaymentRepository, RepositoryProvider,
    SlotStatus, User, UserRepository,
};

#[derive(Default)]
pub struct InMemoryCarRepository {
    cars: DashMap<String, Car>,
}

#[async_trait]
impl CarRepository for InMemoryCarRepository {
    async fn save(&self, new_car: Car) -> DomainResult<Car> {
        if self.cars.contains_key(&new_car.plate_number) {
            return Err(DomainError::Conflict(format!(
                "Car with plate {} already exists",
                new_car.plate_number
            )));
        }
        self.cars.insert(new_car.plate_number.clone(), new_car.clone());
        Ok(new_car)
    }

    async fn find_all(&self) -> DomainResult<Vec<Car>> {
        let mut all: Vec<Car> = self.cars.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.plate_number.cmp(&b.plate_number));
        Ok(all)
    }

    async fn find_by_plate(&self, plate_number: &str) -> DomainResult<Option<Car>> {
        Ok(self.cars.get(plate_number).map(|e| e.value().clone()))
    }

    async fn update(&self, updated: Car) -> DomainResult<()> {
        self.cars.insert(updated.plate_number.clone(), updated);
        Ok(())
    }

    async fn delete_by_plate(&self, plate_number: &str) -> DomainResult<()> {
        self.cars.remove(plate_number);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryParkingSlotRepository {
    slots: DashMap<String, ParkingSlot>,
}

#[async_trait]
impl ParkingSlotRepository for InMemoryParkingSlotRepository {
    async fn save(&self, new_slot: ParkingSlot) -> DomainResult<ParkingSlot> {
        if self.slots.contains_key(&new_slot.slot_number) {
            return Err(DomainError::Conflict(format!(
                "Parking slot {} already exists",
                new_slot.slot_number
            )));
        }
        self.slots.insert(new_slot.slot_number.clone(), new_slot.clone());
        Ok(new_slot)
    }

    async fn find_all(&self) -> DomainResult<Vec<ParkingSlot>> {
        let mut all: Vec<ParkingSlot> = self.slots.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.slot_number.cmp(&b.slot_number));
        Ok(all)
    }

    async fn find_by_number(&self, slot_number: &str) -> DomainResult<Option<ParkingSlot>> {
        Ok(self.slots.get(slot_number).map(|e| e.value().clone()))
    }

    async fn update(&self, updated: ParkingSlot) -> DomainResult<()> {
        self.slots.insert(updated.slot_number.clone(), updated);
        Ok(())
    }

    async fn delete_by_number(&self, slot_number: &str) -> DomainResult<()> {
        self.slots.remove(slot_number);
        Ok(())
    }

    async fn set_status(&self, slot_number: &str, status: SlotStatus) -> DomainResult<ParkingSlot> {
        let mut entry = self.slots.get_mut(slot_number).ok_or(DomainError::NotFound {
            entity: "ParkingSlot",
            field: "slotNumber",
            value: slot_number.to_string(),
        })?;
        entry.status = status;
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }

    async fn try_occupy(&self, slot_number: &str) -> DomainResult<bool> {
        match self.slots.get_mut(slot_number) {
            Some(mut entry) if entry.status == SlotStatus::Available => {
                entry.status = SlotStatus::Occupied;
                entry.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release(&self, slot_number: &str) -> DomainResult<()> {
        if let Some(mut entry) = self.slots.get_mut(slot_number) {
            entry.status = SlotStatus::Available;
            entry.updated_at = Utc::now();
        }
        Ok(())
    }
}

pub struct InMemoryParkingRecordRepository {
    records: DashMap<i32, ParkingRecord>,
    record_counter: AtomicI32,
}

impl Default for InMemoryParkingRecordRepository {
    fn default() -> Self {
        Self {
            records: DashMap::new(),
            record_counter: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl ParkingRecordRepository for InMemoryParkingRecordRepository {
    async fn create(
        &self,
        plate_number: &str,
        slot_number: &str,
        entry_time: DateTime<Utc>,
    ) -> DomainResult<ParkingRecord> {
        let now = Utc::now();
        let record = ParkingRecord {
            id: self.record_counter.fetch_add(1, Ordering::SeqCst),
            plate_number: plate_number.to_string(),
            slot_number: slot_number.to_string(),
            entry_time,
            exit_time: None,
            duration_hours: 0,
            amount_paid: 0,
            is_paid: false,
            created_at: now,
            updated_at: now,
        };
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> DomainResult<Vec<ParkingRecord>> {
        let mut all: Vec<ParkingRecord> = self.records.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.entry_time.cmp(&a.entry_time));
        Ok(all)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingRecord>> {
        Ok(self.records.get(&id).map(|e| e.value().clone()))
    }

    async fn close(
        &self,
        id: i32,
        exit_time: DateTime<Utc>,
        duration_hours: i32,
        amount_paid: i64,
    ) -> DomainResult<bool> {
        match self.records.get_mut(&id) {
            Some(mut entry) if entry.exit_time.is_none() => {
                entry.exit_time = Some(exit_time);
                entry.duration_hours = duration_hours;
                entry.amount_paid = amount_paid;
                entry.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn set_paid(&self, id: i32) -> DomainResult<()> {
        let mut entry = self.records.get_mut(&id).ok_or(DomainError::NotFound {
            entity: "ParkingRecord",
            field: "id",
            value: id.to_string(),
        })?;
        entry.is_paid = true;
        entry.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.records.remove(&id).ok_or(DomainError::NotFound {
            entity: "ParkingRecord",
            field: "id",
            value: id.to_string(),
        })?;
        Ok(())
    }

    async fn find_closed(&self) -> DomainResult<Vec<ParkingRecord>> {
        let mut closed: Vec<ParkingRecord> = self
            .records
            .iter()
            .filter(|e| e.value().exit_time.is_some())
            .map(|e| e.value().clone())
            .collect();
        closed.sort_by(|a, b| b.entry_time.cmp(&a.entry_time));
        Ok(closed)
    }

    async fn find_closed_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<ParkingRecord>> {
        let mut closed: Vec<ParkingRecord> = self
            .records
            .iter()
            .filter(|e| {
                let r = e.value();
                r.exit_time.is_some() && r.entry_time >= start && r.entry_time < end
            })
            .map(|e| e.value().clone())
            .collect();
        closed.sort_by(|a, b| b.entry_time.cmp(&a.entry_time));
        Ok(closed)
    }
}

#[derive(Default)]
pub struct InMemoryPaymentRepository {
    payments: DashMap<String, Payment>,
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, new_payment: Payment) -> DomainResult<Payment> {
        self.payments.insert(new_payment.id.clone(), new_payment.clone());
        Ok(new_payment)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Payment>> {
        Ok(self.payments.get(id).map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Payment>> {
        let mut all: Vec<Payment> = self.payments.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
        Ok(all)
    }

    async fn find_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Payment>> {
        let mut hits: Vec<Payment> = self
            .payments
            .iter()
            .filter(|e| {
                let p = e.value();
                p.payment_date >= start && p.payment_date <= end
            })
            .map(|e| e.value().clone())
            .collect();
        hits.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
        Ok(hits)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, new_user: User) -> DomainResult<User> {
        let duplicate = self
            .users
            .iter()
            .any(|e| e.value().username == new_user.username);
        if duplicate {
            return Err(DomainError::Conflict("Username already exists".to_string()));
        }
        self.users.insert(new_user.id.clone(), new_user.clone());
        Ok(new_user)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|e| e.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|e| e.value().username == username)
            .map(|e| e.value().clone()))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.len() as u64)
    }
}

/// All in-memory repositories behind one provider.
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    cars: InMemoryCarRepository,
    parking_slots: InMemoryParkingSlotRepository,
    parking_records: InMemoryParkingRecordRepository,
    payments: InMemoryPaymentRepository,
    users: InMemoryUserRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaymentMethod;

    #[tokio::test]
    async fn car_round_trips_through_save_and_find() {
        let repos = InMemoryRepositoryProvider::new();
        let saved = repos
            .cars()
            .save(Car::new("RAD 123 A", "Alice Mukamana", "+250788000001"))
            .await
            .unwrap();

        let found = repos.cars().find_by_plate("RAD 123 A").await.unwrap().unwrap();
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn parking_slot_round_trips_through_save_and_find() {
        let repos = InMemoryRepositoryProvider::new();
        let saved = repos
            .parking_slots()
            .save(ParkingSlot::new("A-01", Some("Level 1, Zone A".to_string())))
            .await
            .unwrap();

        let found = repos
            .parking_slots()
            .find_by_number("A-01")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, saved);
        assert_eq!(found.status, SlotStatus::Available);
    }

    #[tokio::test]
    async fn payment_round_trips_through_save_and_find() {
        let repos = InMemoryRepositoryProvider::new();
        let saved = repos
            .payments()
            .save(Payment::new(7, 1500, PaymentMethod::Card))
            .await
            .unwrap();

        let found = repos.payments().find_by_id(&saved.id).await.unwrap().unwrap();
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn duplicate_business_keys_are_conflicts() {
        let repos = InMemoryRepositoryProvider::new();
        repos
            .cars()
            .save(Car::new("RAD 123 A", "Alice", "a@example.com"))
            .await
            .unwrap();
        repos
            .parking_slots()
            .save(ParkingSlot::new("A-01", None))
            .await
            .unwrap();

        let car_err = repos
            .cars()
            .save(Car::new("RAD 123 A", "Bob", "b@example.com"))
            .await
            .unwrap_err();
        let slot_err = repos
            .parking_slots()
            .save(ParkingSlot::new("A-01", None))
            .await
            .unwrap_err();
        assert!(matches!(car_err, DomainError::Conflict(_)));
        assert!(matches!(slot_err, DomainError::Conflict(_)));
    }
}
