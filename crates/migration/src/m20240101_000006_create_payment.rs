use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(pk_auto(Payment::Id))
                    .col(decimal_len(Payment::Amount, 10, 2))
                    .col(date(Payment::PaidOn))
                    .col(string_len(Payment::Method, 20))
                    .col(integer(Payment::AppointmentId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_appointment")
                            .from(Payment::Table, Payment::AppointmentId)
                            .to(Appointment::Table, Appointment::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Payment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Payment { Table, Id, Amount, PaidOn, Method, AppointmentId }

#[derive(DeriveIden)]
enum Appointment { Table, Id }
