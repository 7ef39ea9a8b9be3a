use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::require_text;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "location")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Barber,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Barber => Entity::has_many(crate::barber::Entity).into() }
    }
}

impl Related<crate::barber::Entity> for Entity {
    fn to() -> RelationDef { Relation::Barber.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub const NAME_MAX: usize = 100;
pub const ADDRESS_MAX: usize = 255;
pub const PHONE_MAX: usize = 15;

pub fn validate(name: &str, address: &str, phone: &str) -> Result<(), ModelError> {
    require_text("name", name, NAME_MAX)?;
    require_text("address", address, ADDRESS_MAX)?;
    require_text("phone", phone, PHONE_MAX)
}

pub async fn create(db: &DatabaseConnection, name: &str, address: &str, phone: &str) -> Result<Model, ModelError> {
    validate(name, address, phone)?;
    let am = ActiveModel {
        name: Set(name.trim().to_string()),
        address: Set(address.trim().to_string()),
        phone: Set(phone.trim().to_string()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Name.eq(name.trim())).one(db).await?)
}
