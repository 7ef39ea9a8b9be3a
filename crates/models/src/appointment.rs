use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{barber, client, service_item};

/// One booked slot. `(barber_id, date, time)` is unique at the database level.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: Date,
    pub time: Time,
    pub client_id: i32,
    pub barber_id: i32,
    pub service_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Client,
    Barber,
    Service,
    Payment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Client => Entity::belongs_to(client::Entity).from(Column::ClientId).to(client::Column::Id).into(),
            Relation::Barber => Entity::belongs_to(barber::Entity).from(Column::BarberId).to(barber::Column::Id).into(),
            Relation::Service => Entity::belongs_to(service_item::Entity).from(Column::ServiceId).to(service_item::Column::Id).into(),
            Relation::Payment => Entity::has_many(crate::payment::Entity).into(),
        }
    }
}

impl Related<client::Entity> for Entity {
    fn to() -> RelationDef { Relation::Client.def() }
}

impl Related<barber::Entity> for Entity {
    fn to() -> RelationDef { Relation::Barber.def() }
}

impl Related<service_item::Entity> for Entity {
    fn to() -> RelationDef { Relation::Service.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert without any booking checks; those belong to the service layer.
pub async fn create(
    db: &DatabaseConnection,
    date: Date,
    time: Time,
    client_id: i32,
    barber_id: i32,
    service_id: i32,
) -> Result<Model, ModelError> {
    let am = ActiveModel {
        date: Set(date),
        time: Set(time),
        client_id: Set(client_id),
        barber_id: Set(barber_id),
        service_id: Set(service_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
