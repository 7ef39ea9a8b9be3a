use chrono::NaiveDate;
use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::{check_len, require_text};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub surname: String,
    #[sea_orm(unique)]
    pub phone: String,
    pub email: Option<String>,
    pub registered_on: Date,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Appointment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Appointment => Entity::has_many(crate::appointment::Entity).into() }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const NAME_MAX: usize = 100;
pub const PHONE_MAX: usize = 15;
pub const EMAIL_MAX: usize = 100;

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    check_len("email", email, EMAIL_MAX)
}

pub fn validate(name: &str, surname: &str, phone: &str, email: Option<&str>) -> Result<(), ModelError> {
    require_text("name", name, NAME_MAX)?;
    require_text("surname", surname, NAME_MAX)?;
    require_text("phone", phone, PHONE_MAX)?;
    if let Some(e) = email {
        validate_email(e)?;
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    surname: &str,
    phone: &str,
    email: Option<&str>,
    registered_on: NaiveDate,
) -> Result<Model, ModelError> {
    validate(name, surname, phone, email)?;
    let am = ActiveModel {
        name: Set(name.trim().to_string()),
        surname: Set(surname.trim().to_string()),
        phone: Set(phone.trim().to_string()),
        email: Set(email.map(|e| e.trim().to_string())),
        registered_on: Set(registered_on),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_phone(db: &DatabaseConnection, phone: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Phone.eq(phone.trim())).one(db).await?)
}
