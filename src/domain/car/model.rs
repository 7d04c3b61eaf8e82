//! Car domain entity

use chrono::{DateTime, Utc};

/// A registered vehicle, identified by its plate number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    /// Plate number (unique business key, trimmed)
    pub plate_number: String,
    /// Owner full name
    pub owner_name: String,
    /// Owner contact info (phone or email)
    pub contact_info: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Car {
    pub fn new(
        plate_number: impl Into<String>,
        owner_name: impl Into<String>,
        contact_info: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            plate_number: plate_number.into().trim().to_string(),
            owner_name: owner_name.into().trim().to_string(),
            contact_info: contact_info.into().trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
