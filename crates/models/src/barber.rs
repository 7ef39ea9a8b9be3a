use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::location;
use crate::validation::{check_len, require_text};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "barber")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub specialty: Option<String>,
    pub location_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Location,
    Appointment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Location => Entity::belongs_to(location::Entity).from(Column::LocationId).to(location::Column::Id).into(),
            Relation::Appointment => Entity::has_many(crate::appointment::Entity).into(),
        }
    }
}

impl Related<location::Entity> for Entity {
    fn to() -> RelationDef { Relation::Location.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub const NAME_MAX: usize = 100;
pub const SPECIALTY_MAX: usize = 255;

pub fn validate(name: &str, surname: &str, specialty: Option<&str>) -> Result<(), ModelError> {
    require_text("name", name, NAME_MAX)?;
    require_text("surname", surname, NAME_MAX)?;
    if let Some(s) = specialty {
        check_len("specialty", s, SPECIALTY_MAX)?;
    }
    Ok(())
}

/// Insert a barber. The caller has already checked that `location_id` exists.
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    surname: &str,
    specialty: Option<&str>,
    location_id: i32,
) -> Result<Model, ModelError> {
    validate(name, surname, specialty)?;
    let am = ActiveModel {
        name: Set(name.trim().to_string()),
        surname: Set(surname.trim().to_string()),
        specialty: Set(specialty.map(str::to_string)),
        location_id: Set(location_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_full_name(db: &DatabaseConnection, name: &str, surname: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::Name.eq(name.trim()))
        .filter(Column::Surname.eq(surname.trim()))
        .one(db)
        .await?)
}
