//! SeaORM implementation of ParkingSlotRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, DomainResult, ParkingSlot, ParkingSlotRepository, SlotStatus};
use crate::infrastructure::database::entities::parking_slot;

use super::db_err;

pub struct SeaOrmParkingSlotRepository {
    db: DatabaseConnection,
}

impl SeaOrmParkingSlotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn entity_status_to_domain(status: parking_slot::SlotStatus) -> SlotStatus {
    match status {
        parking_slot::SlotStatus::Available => SlotStatus::Available,
        parking_slot::SlotStatus::Occupied => SlotStatus::Occupied,
    }
}

fn domain_status_to_entity(status: SlotStatus) -> parking_slot::SlotStatus {
    match status {
        SlotStatus::Available => parking_slot::SlotStatus::Available,
        SlotStatus::Occupied => parking_slot::SlotStatus::Occupied,
    }
}

fn model_to_domain(model: parking_slot::Model) -> ParkingSlot {
    ParkingSlot {
        slot_number: model.slot_number,
        location: model.location,
        status: entity_status_to_domain(model.status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn domain_to_active(slot: &ParkingSlot) -> parking_slot::ActiveModel {
    parking_slot::ActiveModel {
        slot_number: Set(slot.slot_number.clone()),
        location: Set(slot.location.clone()),
        status: Set(domain_status_to_entity(slot.status)),
        created_at: Set(slot.created_at),
        updated_at: Set(slot.updated_at),
    }
}

#[async_trait]
impl ParkingSlotRepository for SeaOrmParkingSlotRepository {
    async fn save(&self, new_slot: ParkingSlot) -> DomainResult<ParkingSlot> {
        let model = domain_to_active(&new_slot).insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
                DomainError::Conflict(format!(
                    "Parking slot {} already exists",
                    new_slot.slot_number
                ))
            } else {
                db_err(e)
            }
        })?;
        Ok(model_to_domain(model))
    }

    async fn find_all(&self) -> DomainResult<Vec<ParkingSlot>> {
        let models = parking_slot::Entity::find()
            .order_by_asc(parking_slot::Column::SlotNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_number(&self, slot_number: &str) -> DomainResult<Option<ParkingSlot>> {
        let model = parking_slot::Entity::find_by_id(slot_number)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, updated: ParkingSlot) -> DomainResult<()> {
        domain_to_active(&updated).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete_by_number(&self, slot_number: &str) -> DomainResult<()> {
        parking_slot::Entity::delete_by_id(slot_number)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn set_status(&self, slot_number: &str, status: SlotStatus) -> DomainResult<ParkingSlot> {
        let model = parking_slot::Entity::find_by_id(slot_number)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "ParkingSlot",
                field: "slotNumber",
                value: slot_number.to_string(),
            })?;

        let mut active: parking_slot::ActiveModel = model.into();
        active.status = Set(domain_status_to_entity(status));
        active.updated_at = Set(Utc::now());
        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn try_occupy(&self, slot_number: &str) -> DomainResult<bool> {
        // Conditional update keyed on the current status; the row count
        // tells us whether this caller won.
        let result = parking_slot::Entity::update_many()
            .col_expr(
                parking_slot::Column::Status,
                sea_orm::sea_query::Expr::value(parking_slot::SlotStatus::Occupied),
            )
            .col_expr(
                parking_slot::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(parking_slot::Column::SlotNumber.eq(slot_number))
            .filter(parking_slot::Column::Status.eq(parking_slot::SlotStatus::Available))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn release(&self, slot_number: &str) -> DomainResult<()> {
        parking_slot::Entity::update_many()
            .col_expr(
                parking_slot::Column::Status,
                sea_orm::sea_query::Expr::value(parking_slot::SlotStatus::Available),
            )
            .col_expr(
                parking_slot::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(parking_slot::Column::SlotNumber.eq(slot_number))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
