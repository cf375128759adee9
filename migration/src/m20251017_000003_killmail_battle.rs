use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251017_000001_killmail::Killmail, m20251017_000002_battle::Battle};

static IDX_KILLMAIL_BATTLE_BATTLE_ID: &str = "idx-killmail_battle-battle_id";
static FK_KILLMAIL_BATTLE_KILLMAIL_ID: &str = "fk-killmail_battle-killmail_id";
static FK_KILLMAIL_BATTLE_BATTLE_ID: &str = "fk-killmail_battle-battle_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KillmailBattle::Table)
                    .if_not_exists()
                    .col(big_integer(KillmailBattle::KillmailId).primary_key())
                    .col(integer(KillmailBattle::BattleId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_KILLMAIL_BATTLE_BATTLE_ID)
                    .table(KillmailBattle::Table)
                    .col(KillmailBattle::BattleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_KILLMAIL_BATTLE_KILLMAIL_ID)
                    .from_tbl(KillmailBattle::Table)
                    .from_col(KillmailBattle::KillmailId)
                    .to_tbl(Killmail::Table)
                    .to_col(Killmail::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_KILLMAIL_BATTLE_BATTLE_ID)
                    .from_tbl(KillmailBattle::Table)
                    .from_col(KillmailBattle::BattleId)
                    .to_tbl(Battle::Table)
                    .to_col(Battle::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_KILLMAIL_BATTLE_BATTLE_ID)
                    .table(KillmailBattle::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_KILLMAIL_BATTLE_KILLMAIL_ID)
                    .table(KillmailBattle::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_KILLMAIL_BATTLE_BATTLE_ID)
                    .table(KillmailBattle::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(KillmailBattle::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum KillmailBattle {
    Table,
    KillmailId,
    BattleId,
}
