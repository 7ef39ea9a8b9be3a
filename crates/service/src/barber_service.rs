use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use models::{barber, location};
use models::validation::{check_len, require_text};
use crate::errors::{db_err, map_write_err, model_write_err, ServiceError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBarber {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub location_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BarberPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    /// `null` clears the specialty; a missing key keeps it.
    #[serde(default, deserialize_with = "common::serde_helpers::double_option")]
    pub specialty: Option<Option<String>>,
    pub location_id: Option<i32>,
}

async fn ensure_location(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let found = location::Entity::find_by_id(id).one(db).await.map_err(db_err)?;
    found.map(|_| ()).ok_or_else(|| ServiceError::not_found_id("location", id))
}

fn duplicate(name: &str, surname: &str) -> ServiceError {
    ServiceError::Conflict(format!("a barber named '{} {}' already exists", name.trim(), surname.trim()))
}

pub async fn create_barber(db: &DatabaseConnection, input: NewBarber) -> Result<barber::Model, ServiceError> {
    let name = input.name.ok_or_else(|| ServiceError::required("name"))?;
    let surname = input.surname.ok_or_else(|| ServiceError::required("surname"))?;
    let location_id = input.location_id.ok_or_else(|| ServiceError::required("location_id"))?;
    barber::validate(&name, &surname, input.specialty.as_deref())?;

    ensure_location(db, location_id).await?;
    if barber::find_by_full_name(db, &name, &surname).await?.is_some() {
        return Err(duplicate(&name, &surname));
    }
    let created = barber::create(db, &name, &surname, input.specialty.as_deref(), location_id)
        .await
        .map_err(|e| model_write_err(e, "barber"))?;
    info!(barber_id = created.id, location_id, "barber_created");
    Ok(created)
}

pub async fn get_barber(db: &DatabaseConnection, id: i32) -> Result<barber::Model, ServiceError> {
    barber::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found_id("barber", id))
}

/// All barbers, by surname then name.
pub async fn list_barbers(db: &DatabaseConnection) -> Result<Vec<barber::Model>, ServiceError> {
    barber::Entity::find()
        .order_by_asc(barber::Column::Surname)
        .order_by_asc(barber::Column::Name)
        .all(db)
        .await
        .map_err(db_err)
}

pub async fn list_barbers_by_location(db: &DatabaseConnection, location_id: i32) -> Result<Vec<barber::Model>, ServiceError> {
    ensure_location(db, location_id).await?;
    let rows = barber::Entity::find()
        .filter(barber::Column::LocationId.eq(location_id))
        .order_by_asc(barber::Column::Surname)
        .order_by_asc(barber::Column::Name)
        .all(db)
        .await
        .map_err(db_err)?;
    if rows.is_empty() {
        debug!(location_id, "no barbers at location");
    }
    Ok(rows)
}

pub async fn update_barber(db: &DatabaseConnection, id: i32, patch: BarberPatch) -> Result<barber::Model, ServiceError> {
    let current = get_barber(db, id).await?;

    if let Some(name) = &patch.name {
        require_text("name", name, barber::NAME_MAX)?;
    }
    if let Some(surname) = &patch.surname {
        require_text("surname", surname, barber::NAME_MAX)?;
    }
    if let Some(Some(specialty)) = &patch.specialty {
        check_len("specialty", specialty, barber::SPECIALTY_MAX)?;
    }
    if let Some(location_id) = patch.location_id.filter(|l| *l != current.location_id) {
        ensure_location(db, location_id).await?;
    }

    let name = patch.name.as_deref().map(str::trim).unwrap_or(current.name.as_str()).to_string();
    let surname = patch.surname.as_deref().map(str::trim).unwrap_or(current.surname.as_str()).to_string();
    if name != current.name || surname != current.surname {
        if let Some(other) = barber::find_by_full_name(db, &name, &surname).await? {
            if other.id != id {
                return Err(duplicate(&name, &surname));
            }
        }
    }

    let mut am: barber::ActiveModel = current.into();
    am.name = Set(name);
    am.surname = Set(surname);
    if let Some(specialty) = patch.specialty {
        am.specialty = Set(specialty);
    }
    if let Some(location_id) = patch.location_id {
        am.location_id = Set(location_id);
    }
    let updated = am.update(db).await.map_err(|e| map_write_err(e, "barber"))?;
    info!(barber_id = id, "barber_updated");
    Ok(updated)
}

/// Hard delete. Fails while appointments still reference the barber.
pub async fn delete_barber(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    get_barber(db, id).await?;
    barber::Entity::delete_by_id(id).exec(db).await.map_err(|e| map_write_err(e, "barber"))?;
    info!(barber_id = id, "barber_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location_service::{create_location, delete_location, NewLocation};
    use crate::test_support::{get_db, tag};

    #[tokio::test]
    async fn location_is_required() {
        let db = DatabaseConnection::Disconnected;
        let input = NewBarber { name: Some("Ana".into()), surname: Some("Ruiz".into()), ..Default::default() };
        assert!(matches!(create_barber(&db, input).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn barber_crud_service() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };

        let loc = create_location(&db, NewLocation {
            name: Some(format!("Sede {}", tag())),
            address: Some("Calle 3".into()),
            phone: Some("5550003".into()),
        })
        .await?;

        let missing_loc = NewBarber {
            name: Some("Ana".into()),
            surname: Some("Ruiz".into()),
            specialty: None,
            location_id: Some(i32::MAX),
        };
        assert!(matches!(create_barber(&db, missing_loc).await, Err(ServiceError::NotFound(_))));

        let surname = format!("Ruiz {}", tag());
        let input = NewBarber {
            name: Some("Ana".into()),
            surname: Some(surname.clone()),
            specialty: Some("fades".into()),
            location_id: Some(loc.id),
        };
        let b = create_barber(&db, input.clone()).await?;
        assert!(matches!(create_barber(&db, input).await, Err(ServiceError::Conflict(_))));

        let at_loc = list_barbers_by_location(&db, loc.id).await?;
        assert_eq!(at_loc.len(), 1);

        // location with a barber cannot go away
        assert!(matches!(delete_location(&db, loc.id).await, Err(ServiceError::OperationFailed(_))));

        let cleared = update_barber(&db, b.id, BarberPatch { specialty: Some(None), ..Default::default() }).await?;
        assert_eq!(cleared.specialty, None);
        assert_eq!(cleared.surname, surname);

        delete_barber(&db, b.id).await?;
        delete_location(&db, loc.id).await?;
        Ok(())
    }
}
