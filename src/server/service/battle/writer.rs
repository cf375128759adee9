use dioxus_logger::tracing;
use sea_orm::ConnectionTrait;

use crate::server::{
    data::battle::BattleRepository,
    error::{battle::BattleError, Error},
    service::battle::{cluster::Bucket, ClusteringSummary},
};

/// Persists finalized buckets as battles & killmail associations.
///
/// Every write goes through the provided connection, pass the clustering pass's transaction
/// so nothing is visible until the whole pass commits.
pub struct BattleWriter<'a, C: ConnectionTrait> {
    db: &'a C,
    summary: ClusteringSummary,
}

impl<'a, C: ConnectionTrait> BattleWriter<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self {
            db,
            summary: ClusteringSummary::default(),
        }
    }

    /// Number of battles created so far
    pub fn new_battle_count(&self) -> usize {
        self.summary.new_battle_count
    }

    /// Consumes the writer, returning what it has written
    pub fn into_summary(self) -> ClusteringSummary {
        self.summary
    }

    /// Persists a finalized bucket
    ///
    /// - New buckets are inserted as a new battle
    /// - Buckets extending a stored battle update its range & data, battles it absorbed have
    ///   their killmails moved over and are then deleted
    /// - Stored battles which gained nothing are skipped
    ///
    /// # Returns
    /// - `Ok(())` - Bucket persisted or skipped
    /// - `Err(BattleError::InvalidRange)` - Bucket starts after it ends
    /// - `Err(BattleError::BattleNotFound)` - Battle to update or absorb no longer exists
    /// - `Err(Error::DbErr)` - Database write failed
    pub async fn write(&mut self, bucket: Bucket) -> Result<(), Error> {
        if bucket.start > bucket.end {
            return Err(BattleError::InvalidRange {
                start: bucket.start,
                end: bucket.end,
            }
            .into());
        }

        if !bucket.has_changes() {
            tracing::debug!(
                battle_id = bucket.battle_id,
                "Battle unchanged by clustering pass; skipping"
            );
            return Ok(());
        }

        let battle_repo = BattleRepository::new(self.db);
        let data = bucket.data.to_json()?;

        let battle_id = match bucket.battle_id {
            Some(battle_id) => {
                let updated = battle_repo
                    .update(battle_id, bucket.start, bucket.end, data)
                    .await?;
                if updated == 0 {
                    return Err(BattleError::BattleNotFound(battle_id).into());
                }

                if !bucket.absorbed.is_empty() {
                    battle_repo
                        .reassign_killmails(&bucket.absorbed, battle_id)
                        .await?;

                    let deleted = battle_repo.delete_many(&bucket.absorbed).await?;
                    if deleted != bucket.absorbed.len() as u64 {
                        let missing = bucket.absorbed.first().copied().unwrap_or(battle_id);
                        return Err(BattleError::BattleNotFound(missing).into());
                    }

                    tracing::debug!(
                        battle_id = battle_id,
                        absorbed = ?bucket.absorbed,
                        "Merged battles into battle"
                    );
                    self.summary.merged_battle_count += bucket.absorbed.len();
                }

                self.summary.updated_battle_count += 1;
                battle_id
            }
            None => {
                if !bucket.absorbed.is_empty() {
                    return Err(Error::InternalError(format!(
                        "New battle absorbed stored battles {:?} without keeping one of their IDs",
                        bucket.absorbed
                    )));
                }

                let battle = battle_repo.create(bucket.start, bucket.end, data).await?;
                self.summary.new_battle_count += 1;
                battle.id
            }
        };

        battle_repo
            .set_associated_killmails(battle_id, &bucket.killmails)
            .await?;
        self.summary.clustered_killmail_count += bucket.killmails.len();

        tracing::debug!(
            battle_id = battle_id,
            start = bucket.start,
            end = bucket.end,
            killmails = bucket.killmails.len(),
            "Wrote battle"
        );

        Ok(())
    }
}
