//! Car DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Car;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
    #[validate(length(min = 1, max = 20, message = "plateNumber is required"))]
    pub plate_number: String,
    #[validate(length(min = 1, max = 255, message = "ownerName is required"))]
    pub owner_name: String,
    #[validate(length(min = 1, max = 255, message = "contactInfo is required"))]
    pub contact_info: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequest {
    #[validate(length(min = 1, max = 255, message = "ownerName must not be empty"))]
    pub owner_name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "contactInfo must not be empty"))]
    pub contact_info: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarDto {
    pub plate_number: String,
    pub owner_name: String,
    pub contact_info: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Car> for CarDto {
    fn from(car: Car) -> Self {
        Self {
            plate_number: car.plate_number,
            owner_name: car.owner_name,
            contact_info: car.contact_info,
            created_at: car.created_at,
            updated_at: car.updated_at,
        }
    }
}
