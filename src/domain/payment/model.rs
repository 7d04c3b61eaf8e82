//! Payment domain entity

use chrono::{DateTime, Utc};

/// How a payment was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
    MobileMoney,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::MobileMoney => "Mobile Money",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Cash" => Some(Self::Cash),
            "Card" => Some(Self::Card),
            "Mobile Money" => Some(Self::MobileMoney),
            _ => None,
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::Cash
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A settled fee for one parking record. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    /// Unique payment ID (uuid)
    pub id: String,
    /// Record this payment settles
    pub record_id: i32,
    /// Amount, copied from the record at creation time (RWF)
    pub amount_paid: i64,
    pub payment_date: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(record_id: i32, amount_paid: i64, payment_method: PaymentMethod) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            record_id,
            amount_paid,
            payment_date: now,
            payment_method,
            created_at: now,
        }
    }
}
