//! SeaORM implementation of ParkingRecordRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{DomainError, DomainResult, ParkingRecord, ParkingRecordRepository};
use crate::infrastructure::database::entities::parking_record;

use super::db_err;

pub struct SeaOrmParkingRecordRepository {
    db: DatabaseConnection,
}

impl SeaOrmParkingRecordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(model: parking_record::Model) -> ParkingRecord {
    ParkingRecord {
        id: model.id,
        plate_number: model.plate_number,
        slot_number: model.slot_number,
        entry_time: model.entry_time,
        exit_time: model.exit_time,
        duration_hours: model.duration_hours,
        amount_paid: model.amount_paid,
        is_paid: model.is_paid,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl ParkingRecordRepository for SeaOrmParkingRecordRepository {
    async fn create(
        &self,
        plate_number: &str,
        slot_number: &str,
        entry_time: DateTime<Utc>,
    ) -> DomainResult<ParkingRecord> {
        let now = Utc::now();
        let active = parking_record::ActiveModel {
            id: NotSet,
            plate_number: Set(plate_number.to_string()),
            slot_number: Set(slot_number.to_string()),
            entry_time: Set(entry_time),
            exit_time: Set(None),
            duration_hours: Set(0),
            amount_paid: Set(0),
            is_paid: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = active.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn find_all(&self) -> DomainResult<Vec<ParkingRecord>> {
        let models = parking_record::Entity::find()
            .order_by_desc(parking_record::Column::EntryTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingRecord>> {
        let model = parking_record::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn close(
        &self,
        id: i32,
        exit_time: DateTime<Utc>,
        duration_hours: i32,
        amount_paid: i64,
    ) -> DomainResult<bool> {
        // Guarded on exit_time still being null so only one closure lands.
        let result = parking_record::Entity::update_many()
            .col_expr(
                parking_record::Column::ExitTime,
                sea_orm::sea_query::Expr::value(Some(exit_time)),
            )
            .col_expr(
                parking_record::Column::DurationHours,
                sea_orm::sea_query::Expr::value(duration_hours),
            )
            .col_expr(
                parking_record::Column::AmountPaid,
                sea_orm::sea_query::Expr::value(amount_paid),
            )
            .col_expr(
                parking_record::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(parking_record::Column::Id.eq(id))
            .filter(parking_record::Column::ExitTime.is_null())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn set_paid(&self, id: i32) -> DomainResult<()> {
        let model = parking_record::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "ParkingRecord",
                field: "id",
                value: id.to_string(),
            })?;

        let mut active: parking_record::ActiveModel = model.into();
        active.is_paid = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = parking_record::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "ParkingRecord",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }

    async fn find_closed(&self) -> DomainResult<Vec<ParkingRecord>> {
        let models = parking_record::Entity::find()
            .filter(parking_record::Column::ExitTime.is_not_null())
            .order_by_desc(parking_record::Column::EntryTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_closed_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<ParkingRecord>> {
        let models = parking_record::Entity::find()
            .filter(parking_record::Column::ExitTime.is_not_null())
            .filter(parking_record::Column::EntryTime.gte(start))
            .filter(parking_record::Column::EntryTime.lt(end))
            .order_by_desc(parking_record::Column::EntryTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
