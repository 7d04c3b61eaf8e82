use async_trait::async_trait;

use super::model::{ParkingSlot, SlotStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait ParkingSlotRepository: Send + Sync {
    /// Insert a new slot. Fails with `Conflict` on a duplicate slot number.
    async fn save(&self, slot: ParkingSlot) -> DomainResult<ParkingSlot>;
    async fn find_all(&self) -> DomainResult<Vec<ParkingSlot>>;
    async fn find_by_number(&self, slot_number: &str) -> DomainResult<Option<ParkingSlot>>;
    async fn update(&self, slot: ParkingSlot) -> DomainResult<()>;
    async fn delete_by_number(&self, slot_number: &str) -> DomainResult<()>;

    /// Administrative status override. `NotFound` if the slot is absent.
    async fn set_status(&self, slot_number: &str, status: SlotStatus) -> DomainResult<ParkingSlot>;

    /// Atomically flip the slot to `Occupied` only if it is currently
    /// `Available`. Returns `true` if this call acquired the slot; `false`
    /// when the slot was already occupied (or no longer exists). This is
    /// the only way session logic may acquire a slot.
    async fn try_occupy(&self, slot_number: &str) -> DomainResult<bool>;

    /// Return the slot to `Available` unconditionally. A missing slot is
    /// not an error here: releasing is cleanup, not a precondition check.
    async fn release(&self, slot_number: &str) -> DomainResult<()>;
}
