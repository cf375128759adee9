use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    Order, QueryFilter, QueryOrder, QuerySelect,
};
use serde_json::Value;

use crate::server::model::{
    battle::{BattleColumn, BattleFilter, BoundCmp, SortOrder},
    db::{BattleModel, KillmailModel},
};

/// Max killmail associations written per upsert statement.
const ASSOCIATION_BATCH_SIZE: usize = 1000;

/// Repository for battles, killmail to battle associations, and the killmails that have yet
/// to be clustered into a battle.
pub struct BattleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BattleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Get the timestamp of the earliest killmail without a battle association
    ///
    /// # Returns
    /// - `Ok(Some(timestamp))` - Timestamp in milliseconds of the first unclustered killmail
    ///   when ordered by (timestamp, killmail ID)
    /// - `Ok(None)` - Every killmail already belongs to a battle
    pub async fn get_earliest_unclustered_timestamp(&self) -> Result<Option<i64>, DbErr> {
        entity::prelude::Killmail::find()
            .select_only()
            .column(entity::killmail::Column::Timestamp)
            .left_join(entity::prelude::KillmailBattle)
            .filter(entity::killmail_battle::Column::KillmailId.is_null())
            .order_by_asc(entity::killmail::Column::Timestamp)
            .order_by_asc(entity::killmail::Column::Id)
            .into_tuple::<i64>()
            .one(self.db)
            .await
    }

    /// Get a page of killmails without a battle association
    ///
    /// Uses keyset pagination on (timestamp, killmail ID) rather than offsets, associations
    /// written for earlier pages therefore never shift the rows of later pages.
    ///
    /// # Arguments
    /// - `after`: (timestamp, killmail ID) of the last killmail of the previous page, `None`
    ///   for the first page
    /// - `limit`: Max killmails to return
    pub async fn get_unclustered_page(
        &self,
        after: Option<(i64, i64)>,
        limit: u64,
    ) -> Result<Vec<KillmailModel>, DbErr> {
        let mut query = entity::prelude::Killmail::find()
            .left_join(entity::prelude::KillmailBattle)
            .filter(entity::killmail_battle::Column::KillmailId.is_null());

        if let Some((timestamp, killmail_id)) = after {
            query = query.filter(
                Condition::any()
                    .add(entity::killmail::Column::Timestamp.gt(timestamp))
                    .add(
                        Condition::all()
                            .add(entity::killmail::Column::Timestamp.eq(timestamp))
                            .add(entity::killmail::Column::Id.gt(killmail_id)),
                    ),
            );
        }

        query
            .order_by_asc(entity::killmail::Column::Timestamp)
            .order_by_asc(entity::killmail::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Get battles whose [start, end] range intersects the provided range, ordered by start
    pub async fn get_battles_within_range(
        &self,
        start: i64,
        end: i64,
    ) -> Result<Vec<BattleModel>, DbErr> {
        entity::prelude::Battle::find()
            .filter(entity::battle::Column::End.gte(start))
            .filter(entity::battle::Column::Start.lte(end))
            .order_by_asc(entity::battle::Column::Start)
            .order_by_asc(entity::battle::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn create(&self, start: i64, end: i64, data: Value) -> Result<BattleModel, DbErr> {
        let now = Utc::now().naive_utc();

        entity::battle::ActiveModel {
            start: ActiveValue::Set(start),
            end: ActiveValue::Set(end),
            data: ActiveValue::Set(data),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Updates the range & data of an existing battle
    ///
    /// # Returns
    /// - `Ok(rows)` - Number of battles updated, 0 if the battle does not exist
    pub async fn update(&self, id: i32, start: i64, end: i64, data: Value) -> Result<u64, DbErr> {
        let result = entity::prelude::Battle::update_many()
            .col_expr(entity::battle::Column::Start, Expr::value(start))
            .col_expr(entity::battle::Column::End, Expr::value(end))
            .col_expr(entity::battle::Column::Data, Expr::value(data))
            .col_expr(
                entity::battle::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::battle::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes battles by ID, returning the number of battles deleted
    ///
    /// # Notes
    /// - Killmails must be moved off of the battles first, see [`Self::reassign_killmails`]
    pub async fn delete_many(&self, ids: &[i32]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Battle::delete_many()
            .filter(entity::battle::Column::Id.is_in(ids.iter().copied()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Moves every killmail associated with any of `from_battle_ids` onto `to_battle_id`
    pub async fn reassign_killmails(
        &self,
        from_battle_ids: &[i32],
        to_battle_id: i32,
    ) -> Result<u64, DbErr> {
        if from_battle_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::KillmailBattle::update_many()
            .col_expr(
                entity::killmail_battle::Column::BattleId,
                Expr::value(to_battle_id),
            )
            .filter(
                entity::killmail_battle::Column::BattleId.is_in(from_battle_ids.iter().copied()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Associates killmails with a battle
    ///
    /// Upserts on the killmail ID, associating a killmail that already points at the battle is
    /// a no-op and a killmail pointing at another battle is moved.
    ///
    /// # Notes
    /// - If you need transactional behavior, pass a transaction as the connection
    pub async fn set_associated_killmails(
        &self,
        battle_id: i32,
        killmail_ids: &[i64],
    ) -> Result<(), DbErr> {
        for batch in killmail_ids.chunks(ASSOCIATION_BATCH_SIZE) {
            let associations =
                batch
                    .iter()
                    .map(|&killmail_id| entity::killmail_battle::ActiveModel {
                        killmail_id: ActiveValue::Set(killmail_id),
                        battle_id: ActiveValue::Set(battle_id),
                    });

            entity::prelude::KillmailBattle::insert_many(associations)
                .on_conflict(
                    OnConflict::column(entity::killmail_battle::Column::KillmailId)
                        .update_column(entity::killmail_battle::Column::BattleId)
                        .to_owned(),
                )
                .exec_without_returning(self.db)
                .await?;
        }

        Ok(())
    }

    /// Lists battles matching the provided filter
    ///
    /// Negative limits & offsets are ignored, callers exposing this to clients should clamp
    /// them first.
    pub async fn list(&self, filter: &BattleFilter) -> Result<Vec<BattleModel>, DbErr> {
        let mut query = entity::prelude::Battle::find();

        if let Some(id) = filter.id {
            query = query.filter(entity::battle::Column::Id.eq(id));
        }

        if let Some(bound) = filter.bound {
            let column = battle_column(bound.column);
            query = query.filter(match bound.cmp {
                BoundCmp::Lt => column.lt(bound.value),
                BoundCmp::Gt => column.gt(bound.value),
                BoundCmp::Lte => column.lte(bound.value),
                BoundCmp::Gte => column.gte(bound.value),
            });
        }

        for (column, order) in &filter.order_by {
            let order = match order {
                SortOrder::Asc => Order::Asc,
                SortOrder::Desc => Order::Desc,
            };
            query = query.order_by(battle_column(*column), order);
        }

        if let Some(limit) = filter.limit.and_then(|limit| u64::try_from(limit).ok()) {
            query = query.limit(limit);
        }
        if let Some(offset) = filter.offset.and_then(|offset| u64::try_from(offset).ok()) {
            query = query.offset(offset);
        }

        query.all(self.db).await
    }
}

fn battle_column(column: BattleColumn) -> entity::battle::Column {
    match column {
        BattleColumn::Id => entity::battle::Column::Id,
        BattleColumn::Start => entity::battle::Column::Start,
        BattleColumn::End => entity::battle::Column::End,
    }
}
