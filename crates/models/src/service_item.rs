//! A bookable service from the shop's catalog. The module is not called
//! `service` to keep it apart from the business-layer crate of that name.

use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::require_text;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
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

pub fn validate_price(price: Decimal) -> Result<(), ModelError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ModelError::Validation("price must be zero or positive".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    description: Option<&str>,
    price: Decimal,
) -> Result<Model, ModelError> {
    require_text("name", name, NAME_MAX)?;
    validate_price(price)?;
    let am = ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description.map(str::to_string)),
        price: Set(price.round_dp(2)),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Name.eq(name.trim())).one(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn negative_price_rejected() {
        let p = Decimal::from_str("-0.01").unwrap();
        assert!(validate_price(p).is_err());
    }

    #[test]
    fn zero_and_positive_price_accepted() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::from_str("12.50").unwrap()).is_ok());
    }
}
