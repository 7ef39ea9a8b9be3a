//! Create `appointment` table.
//!
//! References are RESTRICT: a client, barber or service with bookings
//! cannot be deleted out from under them.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointment::Table)
                    .if_not_exists()
                    .col(pk_auto(Appointment::Id))
                    .col(date(Appointment::Date))
                    .col(time(Appointment::Time))
                    .col(integer(Appointment::ClientId))
                    .col(integer(Appointment::BarberId))
                    .col(integer(Appointment::ServiceId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_client")
                            .from(Appointment::Table, Appointment::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_barber")
                            .from(Appointment::Table, Appointment::BarberId)
                            .to(Barber::Table, Barber::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_service")
                            .from(Appointment::Table, Appointment::ServiceId)
                            .to(Service::Table, Service::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Appointment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Appointment { Table, Id, Date, Time, ClientId, BarberId, ServiceId }

#[derive(DeriveIden)]
enum Client { Table, Id }

#[derive(DeriveIden)]
enum Barber { Table, Id }

#[derive(DeriveIden)]
enum Service { Table, Id }
