//! Create `versions` table.
//! Releases belong to exactly one service and go away with it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Versions::Table)
                    .if_not_exists()
                    .col(pk_auto(Versions::Id))
                    .col(integer(Versions::ServiceId).not_null())
                    .col(string(Versions::Version).not_null())
                    .col(text_null(Versions::Changelog))
                    .col(timestamp_with_time_zone(Versions::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_versions_service")
                            .from(Versions::Table, Versions::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Versions::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Versions { Table, Id, ServiceId, Version, Changelog, CreatedAt }

#[derive(DeriveIden)]
enum Services { Table, Id }
