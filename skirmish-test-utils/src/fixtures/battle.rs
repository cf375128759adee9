use chrono::Utc;
use entity::prelude::*;
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde_json::{json, Value};

use crate::{fixtures::factory, TestContext, TestError};

impl TestContext {
    pub fn battle<'a>(&'a self) -> BattleFixtures<'a> {
        BattleFixtures { setup: self }
    }
}

pub struct BattleFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> BattleFixtures<'a> {
    /// Insert a killmail with a generated single victim & attacker payload.
    ///
    /// The victim & attacker character IDs are derived from the killmail ID so each mock
    /// killmail contributes distinct participants.
    pub async fn insert_mock_killmail(
        &self,
        id: i64,
        timestamp: i64,
    ) -> Result<entity::killmail::Model, TestError> {
        self.insert_killmail(
            id,
            timestamp,
            factory::mock_killmail_data(id * 10, id * 10 + 1, 30_000_142),
        )
        .await
    }

    /// Insert a killmail with the provided payload.
    pub async fn insert_killmail(
        &self,
        id: i64,
        timestamp: i64,
        data: Value,
    ) -> Result<entity::killmail::Model, TestError> {
        Ok(Killmail::insert(entity::killmail::ActiveModel {
            id: ActiveValue::Set(id),
            timestamp: ActiveValue::Set(timestamp),
            data: ActiveValue::Set(data),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Insert a battle with empty participants & locations.
    pub async fn insert_mock_battle(
        &self,
        start: i64,
        end: i64,
    ) -> Result<entity::battle::Model, TestError> {
        self.insert_battle(start, end, json!({ "participants": [], "locations": [] }))
            .await
    }

    /// Insert a battle with the provided payload.
    pub async fn insert_battle(
        &self,
        start: i64,
        end: i64,
        data: Value,
    ) -> Result<entity::battle::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(Battle::insert(entity::battle::ActiveModel {
            start: ActiveValue::Set(start),
            end: ActiveValue::Set(end),
            data: ActiveValue::Set(data),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Associate an existing killmail with an existing battle.
    pub async fn insert_association(
        &self,
        killmail_id: i64,
        battle_id: i32,
    ) -> Result<(), TestError> {
        KillmailBattle::insert(entity::killmail_battle::ActiveModel {
            killmail_id: ActiveValue::Set(killmail_id),
            battle_id: ActiveValue::Set(battle_id),
        })
        .exec_without_returning(&self.setup.db)
        .await?;

        Ok(())
    }

    /// Every battle in the database ordered by ID.
    pub async fn battles(&self) -> Result<Vec<entity::battle::Model>, TestError> {
        Ok(Battle::find()
            .order_by_asc(entity::battle::Column::Id)
            .all(&self.setup.db)
            .await?)
    }

    /// Every killmail to battle association ordered by killmail ID.
    pub async fn associations(&self) -> Result<Vec<entity::killmail_battle::Model>, TestError> {
        Ok(KillmailBattle::find()
            .order_by_asc(entity::killmail_battle::Column::KillmailId)
            .all(&self.setup.db)
            .await?)
    }

    /// IDs of the killmails associated with a battle, ascending.
    pub async fn killmails_of(&self, battle_id: i32) -> Result<Vec<i64>, TestError> {
        Ok(KillmailBattle::find()
            .filter(entity::killmail_battle::Column::BattleId.eq(battle_id))
            .order_by_asc(entity::killmail_battle::Column::KillmailId)
            .all(&self.setup.db)
            .await?
            .into_iter()
            .map(|association| association.killmail_id)
            .collect())
    }
}
