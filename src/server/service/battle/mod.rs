//! Battle clustering service.
//!
//! Groups killmails without a battle into battles by temporal proximity. A clustering pass
//! runs as a pipeline inside a single transaction:
//!
//! [`KillmailSource`] → [`BatchedReader`] → [`BattleClusterer`] → [`BattleWriter`]
//!
//! Pre-existing battles close to the first new killmail may be extended and/or merged with
//! incoming killmails. Only battles near that first killmail are considered, battles further
//! along are never touched by the same pass. This can only happen when killmails older than
//! the newest battles are ingested and may leave battles on the boundary of the update
//! unmerged, which is tolerated.

pub mod cluster;
pub mod reader;
pub mod source;
pub mod writer;

#[cfg(test)]
mod tests;

use chrono::Duration;
use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        battle::BattleRepository,
        lock::{LockRepository, LockResource},
    },
    error::{battle::BattleError, Error},
    model::{battle::BattleFilter, db::BattleModel},
    service::battle::{
        cluster::BattleClusterer, reader::BatchedReader, source::KillmailSource,
        writer::BattleWriter,
    },
    util::time::battle_time_label,
};

/// Lock key covering every battle.
const ALL_BATTLES_LOCK_KEY: i32 = -1;

/// Battles returned by a listing when no limit is provided
pub const DEFAULT_LIST_LIMIT: i64 = 30;
/// Upper bound on the number of battles returned by a listing
pub const MAX_LIST_LIMIT: i64 = 100;

/// Tuning for a clustering pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusteringConfig {
    /// Max silence between two killmails of the same battle.
    pub window: Duration,

    /// How far past the first unclustered killmail to look for pre-existing battles.
    pub seed_lookahead: Duration,

    /// Killmails fetched from the database per query.
    pub page_size: u64,

    /// Killmails handed to the clusterer at a time.
    pub batch_size: usize,
}

impl ClusteringConfig {
    pub const DEFAULT_WINDOW: Duration = Duration::minutes(20);
    pub const DEFAULT_SEED_LOOKAHEAD: Duration = Duration::hours(1);
    pub const DEFAULT_PAGE_SIZE: u64 = 300;
    pub const DEFAULT_BATCH_SIZE: usize = 300;
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            window: Self::DEFAULT_WINDOW,
            seed_lookahead: Self::DEFAULT_SEED_LOOKAHEAD,
            page_size: Self::DEFAULT_PAGE_SIZE,
            batch_size: Self::DEFAULT_BATCH_SIZE,
        }
    }
}

/// Outcome of a clustering pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusteringSummary {
    /// Battles inserted
    pub new_battle_count: usize,
    /// Pre-existing battles extended
    pub updated_battle_count: usize,
    /// Pre-existing battles deleted after being merged into another battle
    pub merged_battle_count: usize,
    /// Killmails associated with a battle
    pub clustered_killmail_count: usize,
}

pub struct BattleService<'a> {
    db: &'a DatabaseConnection,
    config: ClusteringConfig,
}

impl<'a> BattleService<'a> {
    /// Creates a new instance of [`BattleService`]
    pub fn new(db: &'a DatabaseConnection, config: ClusteringConfig) -> Self {
        Self { db, config }
    }

    /// Clusters every killmail without a battle into battles
    ///
    /// Holds a transactional lock on all battles for the entire pass. Either every battle &
    /// association produced by the pass is committed, or none are.
    ///
    /// # Returns
    /// - `Ok(ClusteringSummary)` - Pass committed, all zero when there was nothing to cluster
    /// - `Err(BattleError::LockUnavailable)` - Another pass is running, retry later
    /// - `Err(BattleError::*)` - Invariant violation, pass rolled back
    /// - `Err(Error::DbErr)` - Database error, pass rolled back
    pub async fn run_clustering_pass(&self) -> Result<ClusteringSummary, Error> {
        let txn = self.db.begin().await?;

        let locked = LockRepository::new(&txn)
            .try_acquire_transactional_lock(LockResource::Battle, ALL_BATTLES_LOCK_KEY)
            .await?;
        if !locked {
            return Err(BattleError::LockUnavailable.into());
        }

        let source = KillmailSource::new(&txn);

        let Some(earliest) = source.earliest_unclustered_timestamp().await? else {
            tracing::info!("No killmails to battle-cluster");
            txn.commit().await?;
            return Ok(ClusteringSummary::default());
        };

        let window = self.config.window.num_milliseconds();
        let seeds = source
            .battles_overlapping(
                earliest.saturating_sub(window),
                earliest.saturating_add(self.config.seed_lookahead.num_milliseconds()),
            )
            .await?;

        let from = battle_time_label(earliest);
        tracing::info!(
            seeded_battles = seeds.len(),
            "Battle-clustering killmails from {}",
            from
        );

        let mut clusterer = BattleClusterer::new(seeds, window)?;
        let mut writer = BattleWriter::new(&txn);

        {
            let mut reader = BatchedReader::new(
                source.unclustered_killmails(self.config.page_size)?,
                self.config.batch_size,
            )?;

            while let Some(batch) = reader.next_batch().await? {
                for killmail in batch {
                    for bucket in clusterer.push(killmail)? {
                        writer.write(bucket).await?;
                    }
                }
            }
        }

        for bucket in clusterer.finish()? {
            writer.write(bucket).await?;
        }

        let summary = writer.into_summary();
        txn.commit().await?;

        tracing::info!(
            updated = summary.updated_battle_count,
            merged = summary.merged_battle_count,
            killmails = summary.clustered_killmail_count,
            "Created {} new battles",
            summary.new_battle_count
        );

        Ok(summary)
    }

    /// Lists battles matching the filter
    ///
    /// The limit defaults to [`DEFAULT_LIST_LIMIT`] and is clamped to
    /// `1..=`[`MAX_LIST_LIMIT`]; negative offsets are treated as 0.
    pub async fn list_battles(&self, mut filter: BattleFilter) -> Result<Vec<BattleModel>, Error> {
        filter.limit = Some(
            filter
                .limit
                .unwrap_or(DEFAULT_LIST_LIMIT)
                .clamp(1, MAX_LIST_LIMIT),
        );
        filter.offset = filter.offset.map(|offset| offset.max(0));

        Ok(BattleRepository::new(self.db).list(&filter).await?)
    }
}
