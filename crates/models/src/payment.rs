use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::appointment;
use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "card")]
    Card,
    #[sea_orm(string_value = "transfer")]
    Transfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    pub paid_on: Date,
    pub method: PaymentMethod,
    pub appointment_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Appointment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Appointment => Entity::belongs_to(appointment::Entity)
                .from(Column::AppointmentId)
                .to(appointment::Column::Id)
                .into(),
        }
    }
}

impl Related<appointment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Appointment.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// New payments must carry a strictly positive amount.
pub fn validate_new_amount(amount: Decimal) -> Result<(), ModelError> {
    if amount <= Decimal::ZERO {
        return Err(ModelError::Validation("amount must be greater than zero".into()));
    }
    Ok(())
}

/// Corrections may zero a payment out but never make it negative.
pub fn validate_amount(amount: Decimal) -> Result<(), ModelError> {
    if amount < Decimal::ZERO {
        return Err(ModelError::Validation("amount must not be negative".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    amount: Decimal,
    paid_on: Date,
    method: PaymentMethod,
    appointment_id: i32,
) -> Result<Model, ModelError> {
    validate_new_amount(amount)?;
    let am = ActiveModel {
        amount: Set(amount.round_dp(2)),
        paid_on: Set(paid_on),
        method: Set(method),
        appointment_id: Set(appointment_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
