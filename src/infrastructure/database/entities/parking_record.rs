//! Parking record entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Parking record model
///
/// `exit_time` is null while the session is open. Reference columns carry
/// the plate and slot numbers without foreign keys, so records survive
/// deletion of the car or slot they mention.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parking_records")]
pub struct Model {
    #[sea_orm(primary_key)]
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
