//! Parking slot domain entity

use chrono::{DateTime, Utc};

/// Occupancy status of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Available,
    Occupied,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
        }
    }

    /// Parse an incoming status string. Only the two exact values are
    /// accepted; anything else is a validation error at the call site.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(Self::Available),
            "Occupied" => Some(Self::Occupied),
            _ => None,
        }
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical parking space.
///
/// Invariant: `status` is `Occupied` exactly while an open
/// `ParkingRecord` references this slot (administrative overrides aside).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingSlot {
    /// Slot number (unique business key)
    pub slot_number: String,
    /// Optional location hint (e.g. "Level 2, Zone B")
    pub location: Option<String>,
    pub status: SlotStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ParkingSlot {
    pub fn new(slot_number: impl Into<String>, location: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            slot_number: slot_number.into().trim().to_string(),
            location: location.map(|l| l.trim().to_string()),
            status: SlotStatus::Available,
            created_at: now,
            updated_at: now,
        }
    }
}
