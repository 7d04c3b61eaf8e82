//! Parking slot DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::ParkingSlot;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlotRequest {
    #[validate(length(min = 1, max = 20, message = "slotNumber is required"))]
    pub slot_number: String,
    #[validate(length(max = 255))]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlotRequest {
    #[validate(length(max = 255))]
    pub location: Option<String>,
    /// "Available" or "Occupied"
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetSlotStatusRequest {
    /// "Available" or "Occupied"
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotDto {
    pub slot_number: String,
    pub location: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ParkingSlot> for SlotDto {
    fn from(slot: ParkingSlot) -> Self {
        Self {
            slot_number: slot.slot_number,
            location: slot.location,
            status: slot.status.as_str().to_string(),
            created_at: slot.created_at,
            updated_at: slot.updated_at,
        }
    }
}
