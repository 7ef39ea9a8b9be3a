//! The service catalog: what a client can book and what it costs.

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::service_item;
use models::validation::require_text;
use crate::errors::{db_err, map_write_err, model_write_err, ServiceError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewService {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicePatch {
    pub name: Option<String>,
    /// `null` clears; `""` stores an empty description.
    #[serde(default, deserialize_with = "common::serde_helpers::double_option")]
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
}

fn check_price(price: Decimal) -> Result<(), ServiceError> {
    if price < Decimal::ZERO {
        return Err(ServiceError::Validation("price must be zero or positive".into()));
    }
    Ok(())
}

fn name_taken(name: &str) -> ServiceError {
    ServiceError::Conflict(format!("a service named '{}' already exists", name.trim()))
}

pub async fn create_service(db: &DatabaseConnection, input: NewService) -> Result<service_item::Model, ServiceError> {
    let name = input.name.ok_or_else(|| ServiceError::required("name"))?;
    let price = input.price.ok_or_else(|| ServiceError::required("price"))?;
    check_price(price)?;
    require_text("name", &name, service_item::NAME_MAX)?;

    if service_item::find_by_name(db, &name).await?.is_some() {
        return Err(name_taken(&name));
    }
    let created = service_item::create(db, &name, input.description.as_deref(), price)
        .await
        .map_err(|e| model_write_err(e, "service"))?;
    info!(service_id = created.id, price = %created.price, "service_created");
    Ok(created)
}

pub async fn get_service(db: &DatabaseConnection, id: i32) -> Result<service_item::Model, ServiceError> {
    service_item::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found_id("service", id))
}

pub async fn list_services(db: &DatabaseConnection) -> Result<Vec<service_item::Model>, ServiceError> {
    service_item::Entity::find().order_by_asc(service_item::Column::Id).all(db).await.map_err(db_err)
}

pub async fn update_service(db: &DatabaseConnection, id: i32, patch: ServicePatch) -> Result<service_item::Model, ServiceError> {
    if let Some(price) = patch.price {
        check_price(price)?;
    }
    let current = get_service(db, id).await?;
    let mut am: service_item::ActiveModel = current.clone().into();

    if let Some(name) = patch.name {
        require_text("name", &name, service_item::NAME_MAX)?;
        if name.trim() != current.name {
            if let Some(other) = service_item::find_by_name(db, &name).await? {
                if other.id != id {
                    return Err(name_taken(&name));
                }
            }
        }
        am.name = Set(name.trim().to_string());
    }
    if let Some(description) = patch.description {
        am.description = Set(description);
    }
    if let Some(price) = patch.price {
        am.price = Set(price.round_dp(2));
    }

    let updated = am.update(db).await.map_err(|e| map_write_err(e, "service"))?;
    info!(service_id = id, "service_updated");
    Ok(updated)
}

/// Hard delete. Fails while appointments still reference the service.
pub async fn delete_service(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    get_service(db, id).await?;
    service_item::Entity::delete_by_id(id).exec(db).await.map_err(|e| map_write_err(e, "service"))?;
    info!(service_id = id, "service_deleted");
    Ok(())
}
