use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::ParkingRecord;
use crate::domain::DomainResult;

#[async_trait]
pub trait ParkingRecordRepository: Send + Sync {
    /// Insert a new open record and return it with its assigned ID.
    async fn create(
        &self,
        plate_number: &str,
        slot_number: &str,
        entry_time: DateTime<Utc>,
    ) -> DomainResult<ParkingRecord>;

    /// All records, newest entry first.
    async fn find_all(&self) -> DomainResult<Vec<ParkingRecord>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingRecord>>;

    /// Atomically close the record: set `exit_time`, `duration_hours` and
    /// `amount_paid` only if `exit_time` is currently null. Returns `true`
    /// if this call closed the record, `false` if it was already closed
    /// (or deleted meanwhile).
    async fn close(
        &self,
        id: i32,
        exit_time: DateTime<Utc>,
        duration_hours: i32,
        amount_paid: i64,
    ) -> DomainResult<bool>;

    /// Mark the record as paid. `NotFound` if absent.
    async fn set_paid(&self, id: i32) -> DomainResult<()>;

    /// Delete the record. `NotFound` if absent.
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// All closed records (exit time present), newest entry first.
    async fn find_closed(&self) -> DomainResult<Vec<ParkingRecord>>;

    /// Closed records with `entry_time` in `[start, end)`, newest entry
    /// first.
    async fn find_closed_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<ParkingRecord>>;
}
