use sea_orm_migration::{prelude::*, schema::*};

static IDX_KILLMAIL_TIMESTAMP_ID: &str = "idx-killmail-timestamp-id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Killmail::Table)
                    .if_not_exists()
                    .col(big_integer(Killmail::Id).primary_key())
                    .col(big_integer(Killmail::Timestamp))
                    .col(json(Killmail::Data))
                    .col(timestamp(Killmail::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_KILLMAIL_TIMESTAMP_ID)
                    .table(Killmail::Table)
                    .col(Killmail::Timestamp)
                    .col(Killmail::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_KILLMAIL_TIMESTAMP_ID)
                    .table(Killmail::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Killmail::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Killmail {
    Table,
    Id,
    Timestamp,
    Data,
    CreatedAt,
}
