use chrono::{Local, NaiveDate};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::client;
use models::validation::require_text;
use crate::errors::{db_err, map_write_err, model_write_err, ServiceError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewClient {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Defaults to today.
    #[serde(default)]
    pub registered_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "common::serde_helpers::double_option")]
    pub email: Option<Option<String>>,
    pub registered_on: Option<NaiveDate>,
}

fn phone_taken(phone: &str) -> ServiceError {
    ServiceError::Conflict(format!("phone {} is already registered", phone.trim()))
}

pub async fn create_client(db: &DatabaseConnection, input: NewClient) -> Result<client::Model, ServiceError> {
    let name = input.name.ok_or_else(|| ServiceError::required("name"))?;
    let surname = input.surname.ok_or_else(|| ServiceError::required("surname"))?;
    let phone = input.phone.ok_or_else(|| ServiceError::required("phone"))?;
    client::validate(&name, &surname, &phone, input.email.as_deref())?;

    if client::find_by_phone(db, &phone).await?.is_some() {
        return Err(phone_taken(&phone));
    }
    let registered_on = input.registered_on.unwrap_or_else(|| Local::now().date_naive());
    let created = client::create(db, &name, &surname, &phone, input.email.as_deref(), registered_on)
        .await
        .map_err(|e| model_write_err(e, "client"))?;
    info!(client_id = created.id, "client_created");
    Ok(created)
}

pub async fn get_client(db: &DatabaseConnection, id: i32) -> Result<client::Model, ServiceError> {
    client::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found_id("client", id))
}

/// Oldest registrations first.
pub async fn list_clients(db: &DatabaseConnection) -> Result<Vec<client::Model>, ServiceError> {
    client::Entity::find()
        .order_by_asc(client::Column::RegisteredOn)
        .order_by_asc(client::Column::Id)
        .all(db)
        .await
        .map_err(db_err)
}

pub async fn update_client(db: &DatabaseConnection, id: i32, patch: ClientPatch) -> Result<client::Model, ServiceError> {
    let current = get_client(db, id).await?;
    let mut am: client::ActiveModel = current.clone().into();

    if let Some(name) = patch.name {
        require_text("name", &name, client::NAME_MAX)?;
        am.name = Set(name.trim().to_string());
    }
    if let Some(surname) = patch.surname {
        require_text("surname", &surname, client::NAME_MAX)?;
        am.surname = Set(surname.trim().to_string());
    }
    if let Some(phone) = patch.phone {
        require_text("phone", &phone, client::PHONE_MAX)?;
        if phone.trim() != current.phone {
            if let Some(other) = client::find_by_phone(db, &phone).await? {
                if other.id != id {
                    return Err(phone_taken(&phone));
                }
            }
        }
        am.phone = Set(phone.trim().to_string());
    }
    match patch.email {
        Some(Some(email)) => {
            client::validate_email(&email)?;
            am.email = Set(Some(email.trim().to_string()));
        }
        Some(None) => am.email = Set(None),
        None => {}
    }
    if let Some(registered_on) = patch.registered_on {
        am.registered_on = Set(registered_on);
    }

    let updated = am.update(db).await.map_err(|e| map_write_err(e, "client"))?;
    info!(client_id = id, "client_updated");
    Ok(updated)
}

/// Hard delete. Fails while appointments still reference the client.
pub async fn delete_client(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    get_client(db, id).await?;
    client::Entity::delete_by_id(id).exec(db).await.map_err(|e| map_write_err(e, "client"))?;
    info!(client_id = id, "client_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, tag};

    #[tokio::test]
    async fn bad_email_rejected_before_db() {
        let db = DatabaseConnection::Disconnected;
        let input = NewClient {
            name: Some("Luis".into()),
            surname: Some("Paz".into()),
            phone: Some("555".into()),
            email: Some("not-an-email".into()),
            registered_on: None,
        };
        assert!(matches!(create_client(&db, input).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn client_crud_service() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };

        let phone = format!("7{}", tag());
        let input = NewClient {
            name: Some("Luis".into()),
            surname: Some("Paz".into()),
            phone: Some(phone.clone()),
            email: Some("luis@example.com".into()),
            registered_on: None,
        };
        let c = create_client(&db, input.clone()).await?;
        assert_eq!(c.registered_on, Local::now().date_naive());
        assert!(matches!(create_client(&db, input).await, Err(ServiceError::Conflict(_))));

        // key missing keeps the email, null clears it
        let kept = update_client(&db, c.id, ClientPatch { name: Some("Luisa".into()), ..Default::default() }).await?;
        assert_eq!(kept.email.as_deref(), Some("luis@example.com"));
        let cleared = update_client(&db, c.id, ClientPatch { email: Some(None), ..Default::default() }).await?;
        assert_eq!(cleared.email, None);
        assert_eq!(cleared.name, "Luisa");

        delete_client(&db, c.id).await?;
        assert!(matches!(get_client(&db, c.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_db_is_not_a_validation_error() {
        let db = DatabaseConnection::Disconnected;
        let input = NewClient {
            name: Some("Luis".into()),
            surname: Some("Paz".into()),
            phone: Some("555".into()),
            email: None,
            registered_on: None,
        };
        assert!(matches!(create_client(&db, input).await, Err(ServiceError::Db(_))));
    }

    #[tokio::test]
    async fn racing_duplicate_phone_is_a_conflict() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };

        // a concurrent writer inserted the same phone after our lookup
        let phone = format!("6{}", tag());
        let today = Local::now().date_naive();
        let first = client::create(&db, "Ana", "Paz", &phone, None, today).await?;
        let err = client::create(&db, "Eva", "Paz", &phone, None, today)
            .await
            .map_err(|e| model_write_err(e, "client"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "got {err:?}");

        delete_client(&db, first.id).await?;
        Ok(())
    }
}
