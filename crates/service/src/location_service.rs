use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::location;
use models::validation::require_text;
use crate::errors::{db_err, map_write_err, model_write_err, ServiceError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLocation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Create a location; its name must be unused.
pub async fn create_location(db: &DatabaseConnection, input: NewLocation) -> Result<location::Model, ServiceError> {
    let name = input.name.ok_or_else(|| ServiceError::required("name"))?;
    let address = input.address.ok_or_else(|| ServiceError::required("address"))?;
    let phone = input.phone.ok_or_else(|| ServiceError::required("phone"))?;
    location::validate(&name, &address, &phone)?;

    if location::find_by_name(db, &name).await?.is_some() {
        return Err(ServiceError::Conflict(format!("a location named '{}' already exists", name.trim())));
    }
    let created = location::create(db, &name, &address, &phone)
        .await
        .map_err(|e| model_write_err(e, "location"))?;
    info!(location_id = created.id, name = %created.name, "location_created");
    Ok(created)
}

pub async fn get_location(db: &DatabaseConnection, id: i32) -> Result<location::Model, ServiceError> {
    location::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found_id("location", id))
}

pub async fn list_locations(db: &DatabaseConnection) -> Result<Vec<location::Model>, ServiceError> {
    location::Entity::find().order_by_asc(location::Column::Id).all(db).await.map_err(db_err)
}

/// Partial update; a new name must not belong to another location.
pub async fn update_location(db: &DatabaseConnection, id: i32, patch: LocationPatch) -> Result<location::Model, ServiceError> {
    let current = get_location(db, id).await?;
    let mut am: location::ActiveModel = current.clone().into();

    if let Some(name) = patch.name {
        require_text("name", &name, location::NAME_MAX)?;
        if name.trim() != current.name {
            if let Some(other) = location::find_by_name(db, &name).await? {
                if other.id != id {
                    return Err(ServiceError::Conflict(format!("a location named '{}' already exists", name.trim())));
                }
            }
        }
        am.name = Set(name.trim().to_string());
    }
    if let Some(address) = patch.address {
        require_text("address", &address, location::ADDRESS_MAX)?;
        am.address = Set(address.trim().to_string());
    }
    if let Some(phone) = patch.phone {
        require_text("phone", &phone, location::PHONE_MAX)?;
        am.phone = Set(phone.trim().to_string());
    }

    let updated = am.update(db).await.map_err(|e| map_write_err(e, "location"))?;
    info!(location_id = id, "location_updated");
    Ok(updated)
}

/// Hard delete. Fails while barbers are still assigned to the location.
pub async fn delete_location(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    get_location(db, id).await?;
    location::Entity::delete_by_id(id).exec(db).await.map_err(|e| map_write_err(e, "location"))?;
    info!(location_id = id, "location_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, tag};

    #[tokio::test]
    async fn missing_field_rejected_before_db() {
        // never touches the connection
        let db = DatabaseConnection::Disconnected;
        let input = NewLocation { name: Some("Centro".into()), address: None, phone: Some("555".into()) };
        assert!(matches!(create_location(&db, input).await, Err(ServiceError::Validation(_))));
        let blank = NewLocation { name: Some("  ".into()), address: Some("Calle 1".into()), phone: Some("555".into()) };
        assert!(matches!(create_location(&db, blank).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn location_crud_service() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };

        let name = format!("Sede {}", tag());
        let input = NewLocation { name: Some(name.clone()), address: Some("Av. Sol 12".into()), phone: Some("5551234".into()) };
        let loc = create_location(&db, input.clone()).await?;
        assert_eq!(loc.name, name);

        assert!(matches!(create_location(&db, input).await, Err(ServiceError::Conflict(_))));

        let renamed = format!("Sede {}", tag());
        let patch = LocationPatch { name: Some(renamed.clone()), ..Default::default() };
        let updated = update_location(&db, loc.id, patch).await?;
        assert_eq!(updated.name, renamed);
        assert_eq!(updated.address, "Av. Sol 12");

        assert!(list_locations(&db).await?.iter().any(|l| l.id == loc.id));

        delete_location(&db, loc.id).await?;
        assert!(matches!(get_location(&db, loc.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete_location(&db, loc.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
