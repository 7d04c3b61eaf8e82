//! Session lifecycle logic
//!
//! The only part of the system with cross-entity invariants: opening and
//! closing a parking record must keep the referenced slot's status
//! consistent, and closure must produce exactly one payment. All status
//! transitions on shared state go through the atomic conditional-update
//! primitives on the repositories (`try_occupy`, `close`), so two
//! concurrent requests cannot both succeed.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::{
    DomainError, DomainResult, FeeSchedule, ParkingRecord, ParkingRecordRepository,
    ParkingSlotRepository, Payment, PaymentMethod, PaymentRepository, RepositoryProvider,
};

/// Input for opening a session.
#[derive(Debug, Clone)]
pub struct OpenSession {
    pub plate_number: String,
    pub slot_number: String,
}

/// Input for closing a session.
#[derive(Debug, Clone)]
pub struct CloseSession {
    pub record_id: i32,
    /// Defaults to cash when the caller does not specify one.
    pub payment_method: PaymentMethod,
}

/// Input for settling a closed session's bill.
#[derive(Debug, Clone)]
pub struct SettlePayment {
    pub record_id: i32,
    pub payment_method: PaymentMethod,
}

/// Result of a successful closure.
#[derive(Debug, Clone)]
pub struct ClosedSession {
    pub record: ParkingRecord,
    pub payment: Payment,
}

/// Service implementing the parking-session lifecycle rules.
pub struct SessionService {
    repos: Arc<dyn RepositoryProvider>,
    fees: FeeSchedule,
}

impl SessionService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, fees: FeeSchedule) -> Self {
        Self { repos, fees }
    }

    /// Open a session: the slot must exist and be available. Acquisition is
    /// a compare-and-set, so a concurrent open against the same slot loses
    /// with a conflict instead of double-booking.
    pub async fn open_session(&self, input: OpenSession) -> DomainResult<ParkingRecord> {
        let plate_number = input.plate_number.trim();
        if plate_number.is_empty() {
            return Err(DomainError::Validation("plateNumber is required".into()));
        }

        let slot = self
            .repos
            .parking_slots()
            .find_by_number(&input.slot_number)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "ParkingSlot",
                field: "slotNumber",
                value: input.slot_number.clone(),
            })?;

        if !self.repos.parking_slots().try_occupy(&slot.slot_number).await? {
            return Err(DomainError::Conflict(format!(
                "Parking slot {} is already occupied",
                slot.slot_number
            )));
        }

        let record = match self
            .repos
            .parking_records()
            .create(plate_number, &slot.slot_number, Utc::now())
            .await
        {
            Ok(record) => record,
            Err(e) => {
                // The slot was acquired above; hand it back before failing.
                if let Err(release_err) = self.repos.parking_slots().release(&slot.slot_number).await
                {
                    warn!(
                        slot = %slot.slot_number,
                        error = %release_err,
                        "failed to release slot after record insert error"
                    );
                }
                return Err(e);
            }
        };

        info!(
            record_id = record.id,
            plate = %record.plate_number,
            slot = %record.slot_number,
            "session opened"
        );
        Ok(record)
    }

    /// Close a session: set the exit time exactly once, bill the rounded-up
    /// hourly fee, create the payment, and release the slot.
    pub async fn close_session(&self, input: CloseSession) -> DomainResult<ClosedSession> {
        let record = self.require_record(input.record_id).await?;

        if record.exit_time.is_some() {
            return Err(DomainError::Conflict(format!(
                "Parking record {} already closed",
                record.id
            )));
        }

        let exit_time = Utc::now();
        let duration_hours = self.fees.billed_hours(record.entry_time, exit_time);
        let amount_paid = self.fees.amount_for(duration_hours);

        // CAS on exit_time: a concurrent close (or delete) makes this a
        // no-op, which surfaces as a conflict instead of a double payment.
        let closed = self
            .repos
            .parking_records()
            .close(record.id, exit_time, duration_hours, amount_paid)
            .await?;
        if !closed {
            return Err(DomainError::Conflict(format!(
                "Parking record {} already closed",
                record.id
            )));
        }

        // The record is closed at this point, so the slot must not stay
        // occupied even if the payment insert fails.
        let payment = match self
            .repos
            .payments()
            .save(Payment::new(record.id, amount_paid, input.payment_method))
            .await
        {
            Ok(payment) => payment,
            Err(e) => {
                if let Err(release_err) =
                    self.repos.parking_slots().release(&record.slot_number).await
                {
                    warn!(
                        slot = %record.slot_number,
                        error = %release_err,
                        "failed to release slot after payment insert error"
                    );
                }
                return Err(e);
            }
        };

        self.repos.parking_slots().release(&record.slot_number).await?;

        info!(
            record_id = record.id,
            duration_hours,
            amount_paid,
            method = %input.payment_method,
            "session closed"
        );

        Ok(ClosedSession {
            record: ParkingRecord {
                exit_time: Some(exit_time),
                duration_hours,
                amount_paid,
                updated_at: exit_time,
                ..record
            },
            payment,
        })
    }

    /// Delete a session in either state. An open record releases its slot
    /// first; payments of a closed record are left in place.
    pub async fn delete_session(&self, record_id: i32) -> DomainResult<()> {
        let record = self.require_record(record_id).await?;

        if record.is_open() {
            self.repos.parking_slots().release(&record.slot_number).await?;
        }

        self.repos.parking_records().delete(record.id).await?;
        debug!(record_id, "session deleted");
        Ok(())
    }

    /// Settle a record explicitly: one payment per record, rejected once
    /// the record is marked paid.
    pub async fn record_payment(&self, input: SettlePayment) -> DomainResult<Payment> {
        let record = self.require_record(input.record_id).await?;

        if record.is_paid {
            return Err(DomainError::Conflict(format!(
                "Parking record {} is already paid",
                record.id
            )));
        }

        let payment = self
            .repos
            .payments()
            .save(Payment::new(record.id, record.amount_paid, input.payment_method))
            .await?;

        self.repos.parking_records().set_paid(record.id).await?;

        info!(
            record_id = record.id,
            amount = record.amount_paid,
            method = %input.payment_method,
            "payment recorded"
        );
        Ok(payment)
    }

    async fn require_record(&self, record_id: i32) -> DomainResult<ParkingRecord> {
        self.repos
            .parking_records()
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "ParkingRecord",
                field: "id",
                value: record_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParkingSlot, SlotStatus};
    use crate::infrastructure::memory::InMemoryRepositoryProvider;

    fn service() -> (Arc<InMemoryRepositoryProvider>, SessionService) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let service = SessionService::new(repos.clone(), FeeSchedule::default());
        (repos, service)
    }

    async fn add_slot(repos: &InMemoryRepositoryProvider, number: &str) {
        repos
            .parking_slots()
            .save(ParkingSlot::new(number, None))
            .await
            .unwrap();
    }

    fn open(plate: &str, slot: &str) -> OpenSession {
        OpenSession {
            plate_number: plate.to_string(),
            slot_number: slot.to_string(),
        }
    }

    fn close(record_id: i32) -> CloseSession {
        CloseSession {
            record_id,
            payment_method: PaymentMethod::Cash,
        }
    }

    #[tokio::test]
    async fn open_session_occupies_the_slot() {
        let (repos, service) = service();
        add_slot(&repos, "A-01").await;

        let record = service.open_session(open("RAD 123 A", "A-01")).await.unwrap();

        assert!(record.exit_time.is_none());
        assert_eq!(record.plate_number, "RAD 123 A");
        let slot = repos
            .parking_slots()
            .find_by_number("A-01")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(slot.status, SlotStatus::Occupied);
    }

    #[tokio::test]
    async fn open_session_against_occupied_slot_conflicts_without_a_record() {
        let (repos, service) = service();
        add_slot(&repos, "A-01").await;
        service.open_session(open("RAD 123 A", "A-01")).await.unwrap();

        let err = service.open_session(open("RAD 999 Z", "A-01")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repos.parking_records().find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn open_session_against_unknown_slot_is_not_found() {
        let (_repos, service) = service();
        let err = service.open_session(open("RAD 123 A", "Z-99")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn close_session_bills_creates_payment_and_releases_slot() {
        let (repos, service) = service();
        add_slot(&repos, "A-01").await;
        let record = service.open_session(open("RAD 123 A", "A-01")).await.unwrap();

        let closed = service.close_session(close(record.id)).await.unwrap();

        assert!(closed.record.exit_time.is_some());
        // Sub-second sessions still pay the one-hour minimum.
        assert_eq!(closed.record.amount_paid, 500);
        assert_eq!(closed.payment.amount_paid, closed.record.amount_paid);
        assert_eq!(closed.payment.record_id, record.id);
        assert_eq!(repos.payments().find_all().await.unwrap().len(), 1);

        let slot = repos
            .parking_slots()
            .find_by_number("A-01")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(slot.status, SlotStatus::Available);
    }

    #[tokio::test]
    async fn closing_twice_conflicts_and_keeps_first_closure() {
        let (repos, service) = service();
        add_slot(&repos, "A-01").await;
        let record = service.open_session(open("RAD 123 A", "A-01")).await.unwrap();

        let first = service.close_session(close(record.id)).await.unwrap();
        let err = service.close_session(close(record.id)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let stored = repos
            .parking_records()
            .find_by_id(record.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.exit_time, first.record.exit_time);
        assert_eq!(stored.amount_paid, first.record.amount_paid);
        // Still exactly one payment.
        assert_eq!(repos.payments().find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleting_an_open_record_releases_its_slot() {
        let (repos, service) = service();
        add_slot(&repos, "A-01").await;
        let record = service.open_session(open("RAD 123 A", "A-01")).await.unwrap();

        service.delete_session(record.id).await.unwrap();

        let slot = repos
            .parking_slots()
            .find_by_number("A-01")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(slot.status, SlotStatus::Available);
        assert!(repos
            .parking_records()
            .find_by_id(record.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn deleting_a_closed_record_leaves_slot_state_alone() {
        let (repos, service) = service();
        add_slot(&repos, "A-01").await;
        add_slot(&repos, "A-02").await;
        let record = service.open_session(open("RAD 123 A", "A-01")).await.unwrap();
        service.close_session(close(record.id)).await.unwrap();

        // Another vehicle takes the slot after the first session closed.
        service.open_session(open("RAD 999 Z", "A-01")).await.unwrap();

        service.delete_session(record.id).await.unwrap();

        let slot = repos
            .parking_slots()
            .find_by_number("A-01")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(slot.status, SlotStatus::Occupied);
    }

    #[tokio::test]
    async fn explicit_payment_marks_record_paid_and_rejects_a_second_one() {
        let (repos, service) = service();
        add_slot(&repos, "A-01").await;
        let record = service.open_session(open("RAD 123 A", "A-01")).await.unwrap();
        service.close_session(close(record.id)).await.unwrap();

        let payment = service
            .record_payment(SettlePayment {
                record_id: record.id,
                payment_method: PaymentMethod::MobileMoney,
            })
            .await
            .unwrap();
        assert_eq!(payment.payment_method, PaymentMethod::MobileMoney);

        let stored = repos
            .parking_records()
            .find_by_id(record.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_paid);

        let err = service
            .record_payment(SettlePayment {
                record_id: record.id,
                payment_method: PaymentMethod::Cash,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn payment_insert_failure_still_releases_the_slot() {
        use async_trait::async_trait;
        use chrono::{DateTime, Utc};

        use crate::domain::{CarRepository, UserRepository};

        struct FailingPayments;

        #[async_trait]
        impl PaymentRepository for FailingPayments {
            async fn save(&self, _payment: Payment) -> DomainResult<Payment> {
                Err(DomainError::Storage("payments table unavailable".into()))
            }

            async fn find_by_id(&self, _id: &str) -> DomainResult<Option<Payment>> {
                Ok(None)
            }

            async fn find_all(&self) -> DomainResult<Vec<Payment>> {
                Ok(Vec::new())
            }

            async fn find_in_range(
                &self,
                _start: DateTime<Utc>,
                _end: DateTime<Utc>,
            ) -> DomainResult<Vec<Payment>> {
                Ok(Vec::new())
            }
        }

        struct BrokenPaymentsProvider {
            inner: InMemoryRepositoryProvider,
            payments: FailingPayments,
        }

        impl RepositoryProvider for BrokenPaymentsProvider {
            fn cars(&self) -> &dyn CarRepository {
                self.inner.cars()
            }

            fn parking_slots(&self) -> &dyn ParkingSlotRepository {
                self.inner.parking_slots()
            }

            fn parking_records(&self) -> &dyn ParkingRecordRepository {
                self.inner.parking_records()
            }

            fn payments(&self) -> &dyn PaymentRepository {
                &self.payments
            }

            fn users(&self) -> &dyn UserRepository {
                self.inner.users()
            }
        }

        let repos = Arc::new(BrokenPaymentsProvider {
            inner: InMemoryRepositoryProvider::new(),
            payments: FailingPayments,
        });
        let service = SessionService::new(repos.clone(), FeeSchedule::default());
        add_slot(&repos.inner, "A-01").await;
        let record = service.open_session(open("RAD 123 A", "A-01")).await.unwrap();

        let err = service.close_session(close(record.id)).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));

        let slot = repos
            .inner
            .parking_slots()
            .find_by_number("A-01")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(slot.status, SlotStatus::Available);
    }

    #[tokio::test]
    async fn slot_cas_only_admits_one_of_two_racers() {
        let (repos, _service) = service();
        add_slot(&repos, "A-01").await;

        let first = repos.parking_slots().try_occupy("A-01").await.unwrap();
        let second = repos.parking_slots().try_occupy("A-01").await.unwrap();
        assert!(first);
        assert!(!second);
    }
}
