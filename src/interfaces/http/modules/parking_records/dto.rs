//! Parking record DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::ClosedSession;
use crate::domain::ParkingRecord;
use crate::interfaces::http::modules::payments::PaymentDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenRecordRequest {
    #[validate(length(min = 1, max = 20, message = "plateNumber is required"))]
    pub plate_number: String,
    #[validate(length(min = 1, max = 20, message = "slotNumber is required"))]
    pub slot_number: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloseRecordRequest {
    /// "Cash", "Card" or "Mobile Money"; defaults to "Cash"
    pub payment_method: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordDto {
    pub id: i32,
    pub plate_number: String,
    pub slot_number: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    pub duration_hours: i32,
    pub amount_paid: i64,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ParkingRecord> for RecordDto {
    fn from(record: ParkingRecord) -> Self {
        Self {
            id: record.id,
            plate_number: record.plate_number,
            slot_number: record.slot_number,
            entry_time: record.entry_time,
            exit_time: record.exit_time,
            duration_hours: record.duration_hours,
            amount_paid: record.amount_paid,
            is_paid: record.is_paid,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClosedRecordDto {
    pub record: RecordDto,
    pub payment: PaymentDto,
}

impl From<ClosedSession> for ClosedRecordDto {
    fn from(closed: ClosedSession) -> Self {
        Self {
            record: RecordDto::from(closed.record),
            payment: PaymentDto::from(closed.payment),
        }
    }
}
