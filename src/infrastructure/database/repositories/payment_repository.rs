//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainResult, Payment, PaymentMethod, PaymentRepository};
use crate::infrastructure::database::entities::payment;

use super::db_err;

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn entity_method_to_domain(method: payment::PaymentMethod) -> PaymentMethod {
    match method {
        payment::PaymentMethod::Cash => PaymentMethod::Cash,
        payment::PaymentMethod::Card => PaymentMethod::Card,
        payment::PaymentMethod::MobileMoney => PaymentMethod::MobileMoney,
    }
}

fn domain_method_to_entity(method: PaymentMethod) -> payment::PaymentMethod {
    match method {
        PaymentMethod::Cash => payment::PaymentMethod::Cash,
        PaymentMethod::Card => payment::PaymentMethod::Card,
        PaymentMethod::MobileMoney => payment::PaymentMethod::MobileMoney,
    }
}

fn model_to_domain(model: payment::Model) -> Payment {
    Payment {
        id: model.id,
        record_id: model.record_id,
        amount_paid: model.amount_paid,
        payment_date: model.payment_date,
        payment_method: entity_method_to_domain(model.payment_method),
        created_at: model.created_at,
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn save(&self, new_payment: Payment) -> DomainResult<Payment> {
        let active = payment::ActiveModel {
            id: Set(new_payment.id.clone()),
            record_id: Set(new_payment.record_id),
            amount_paid: Set(new_payment.amount_paid),
            payment_date: Set(new_payment.payment_date),
            payment_method: Set(domain_method_to_entity(new_payment.payment_method)),
            created_at: Set(new_payment.created_at),
        };
        let model = active.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Payment>> {
        let models = payment::Entity::find()
            .order_by_desc(payment::Column::PaymentDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Payment>> {
        let models = payment::Entity::find()
            .filter(payment::Column::PaymentDate.gte(start))
            .filter(payment::Column::PaymentDate.lte(end))
            .order_by_desc(payment::Column::PaymentDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
