//! Payment DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Payment;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    #[validate(range(min = 1, message = "recordId is required"))]
    pub record_id: i32,
    /// "Cash", "Card" or "Mobile Money"; defaults to "Cash"
    pub payment_method: Option<String>,
}

/// Date-only range; the end date is inclusive.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRangeParams {
    /// YYYY-MM-DD
    pub start_date: Option<String>,
    /// YYYY-MM-DD, inclusive
    pub end_date: Option<String>,
}

impl PaymentRangeParams {
    /// Both dates are required; parse failures surface as validation
    /// errors with the field name.
    pub fn parse(&self) -> Result<(NaiveDate, NaiveDate), String> {
        let start = parse_required_date(self.start_date.as_deref(), "startDate")?;
        let end = parse_required_date(self.end_date.as_deref(), "endDate")?;
        Ok((start, end))
    }
}

fn parse_required_date(value: Option<&str>, field: &str) -> Result<NaiveDate, String> {
    let raw = value.ok_or_else(|| format!("{field} is required"))?;
    raw.parse()
        .map_err(|_| format!("invalid {field}: {raw} (expected YYYY-MM-DD)"))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: String,
    pub record_id: i32,
    pub amount_paid: i64,
    pub payment_date: DateTime<Utc>,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            record_id: payment.record_id,
            amount_paid: payment.amount_paid,
            payment_date: payment.payment_date,
            payment_method: payment.payment_method.as_str().to_string(),
            created_at: payment.created_at,
        }
    }
}
