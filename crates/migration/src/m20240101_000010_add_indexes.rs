use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Appointment: one booking per barber per slot. Backstops the
        // in-process booking guard when several server instances share a db.
        manager
            .create_index(
                Index::create()
                    .name("uniq_appointment_barber_date_time")
                    .table(Appointment::Table)
                    .col(Appointment::BarberId)
                    .col(Appointment::Date)
                    .col(Appointment::Time)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_client")
                    .table(Appointment::Table)
                    .col(Appointment::ClientId)
                    .to_owned(),
            )
            .await?;

        // Barber: composite unique (name, surname)
        manager
            .create_index(
                Index::create()
                    .name("uniq_barber_name_surname")
                    .table(Barber::Table)
                    .col(Barber::Name)
                    .col(Barber::Surname)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_barber_location")
                    .table(Barber::Table)
                    .col(Barber::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_appointment")
                    .table(Payment::Table)
                    .col(Payment::AppointmentId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_payment_paid_on")
                    .table(Payment::Table)
                    .col(Payment::PaidOn)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_appointment_barber_date_time").table(Appointment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_appointment_client").table(Appointment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_barber_name_surname").table(Barber::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_barber_location").table(Barber::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_payment_appointment").table(Payment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_payment_paid_on").table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Appointment { Table, BarberId, Date, Time, ClientId }

#[derive(DeriveIden)]
enum Barber { Table, Name, Surname, LocationId }

#[derive(DeriveIden)]
enum Payment { Table, AppointmentId, PaidOn }
