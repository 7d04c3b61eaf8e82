use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::Payment;
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn save(&self, payment: Payment) -> DomainResult<Payment>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Payment>>;
    /// All payments, newest payment date first.
    async fn find_all(&self) -> DomainResult<Vec<Payment>>;
    /// Payments with `payment_date` in `[start, end]`, newest first.
    async fn find_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Payment>>;
}
