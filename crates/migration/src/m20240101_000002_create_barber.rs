use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Barber::Table)
                    .if_not_exists()
                    .col(pk_auto(Barber::Id))
                    .col(string_len(Barber::Name, 100))
                    .col(string_len(Barber::Surname, 100))
                    .col(string_len_null(Barber::Specialty, 255))
                    .col(integer(Barber::LocationId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_barber_location")
                            .from(Barber::Table, Barber::LocationId)
                            .to(Location::Table, Location::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Barber::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Barber { Table, Id, Name, Surname, Specialty, LocationId }

#[derive(DeriveIden)]
enum Location { Table, Id }
