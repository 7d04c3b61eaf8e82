//! SeaORM implementation of CarRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::{Car, CarRepository, DomainError, DomainResult};
use crate::infrastructure::database::entities::car;

use super::db_err;

pub struct SeaOrmCarRepository {
    db: DatabaseConnection,
}

impl SeaOrmCarRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(model: car::Model) -> Car {
    Car {
        plate_number: model.plate_number,
        owner_name: model.owner_name,
        contact_info: model.contact_info,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn domain_to_active(car: &Car) -> car::ActiveModel {
    car::ActiveModel {
        plate_number: Set(car.plate_number.clone()),
        owner_name: Set(car.owner_name.clone()),
        contact_info: Set(car.contact_info.clone()),
        created_at: Set(car.created_at),
        updated_at: Set(car.updated_at),
    }
}

#[async_trait]
impl CarRepository for SeaOrmCarRepository {
    async fn save(&self, new_car: Car) -> DomainResult<Car> {
        let model = domain_to_active(&new_car).insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
                DomainError::Conflict(format!(
                    "Car with plate {} already exists",
                    new_car.plate_number
                ))
            } else {
                db_err(e)
            }
        })?;
        Ok(model_to_domain(model))
    }

    async fn find_all(&self) -> DomainResult<Vec<Car>> {
        let models = car::Entity::find()
            .order_by_asc(car::Column::PlateNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_plate(&self, plate_number: &str) -> DomainResult<Option<Car>> {
        let model = car::Entity::find_by_id(plate_number)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, updated: Car) -> DomainResult<()> {
        domain_to_active(&updated).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete_by_plate(&self, plate_number: &str) -> DomainResult<()> {
        car::Entity::delete_by_id(plate_number)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
