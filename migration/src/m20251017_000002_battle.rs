use sea_orm_migration::{prelude::*, schema::*};

static IDX_BATTLE_START: &str = "idx-battle-start";
static IDX_BATTLE_END: &str = "idx-battle-end";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Battle::Table)
                    .if_not_exists()
                    .col(pk_auto(Battle::Id))
                    .col(big_integer(Battle::Start))
                    .col(big_integer(Battle::End))
                    .col(json(Battle::Data))
                    .col(timestamp(Battle::CreatedAt))
                    .col(timestamp(Battle::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_BATTLE_START)
                    .table(Battle::Table)
                    .col(Battle::Start)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_BATTLE_END)
                    .table(Battle::Table)
                    .col(Battle::End)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_BATTLE_END)
                    .table(Battle::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_BATTLE_START)
                    .table(Battle::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Battle::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Battle {
    Table,
    Id,
    Start,
    End,
    Data,
    CreatedAt,
    UpdatedAt,
}
