//! Scheduler for the periodic battle clustering pass.
//!
//! Runs [`BattleService::run_clustering_pass`] on the configured cron expression. Each run is
//! wrapped in a [`RetryContext`] so transient database errors and lock contention with another
//! instance are retried before the run is given up on until the next tick.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::Error,
    service::{
        battle::{BattleService, ClusteringConfig},
        retry::RetryContext,
    },
};

/// Job scheduler for the battle clustering pass.
pub struct Scheduler {
    db: DatabaseConnection,
    config: ClusteringConfig,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Arguments
    /// - `db` - Database connection the clustering pass runs against
    /// - `config` - Tuning for each clustering pass
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(db: DatabaseConnection, config: ClusteringConfig) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { db, config, sched })
    }

    /// Registers the clustering job and starts the scheduler.
    ///
    /// # Arguments
    /// - `cron` - Cron expression defining when the pass runs (e.g. `0 */5 * * * *`)
    ///
    /// # Returns
    /// - `Ok(())` - Job registered and scheduler started
    /// - `Err(Error)` - Invalid cron expression or scheduler error
    pub async fn start(&mut self, cron: &str) -> Result<(), Error> {
        let db = self.db.clone();
        let config = self.config;

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let db = db.clone();

                Box::pin(async move {
                    let db = &db;
                    let result = RetryContext::new()
                        .execute_with_retry("battle clustering pass", move || async move {
                            BattleService::new(db, config).run_clustering_pass().await
                        })
                        .await;

                    match result {
                        Ok(summary) => tracing::debug!(
                            "Battle clustering pass created {} and updated {} battle(s)",
                            summary.new_battle_count,
                            summary.updated_battle_count
                        ),
                        Err(e) => tracing::error!("Error running battle clustering pass: {:?}", e),
                    }
                })
            })?)
            .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Stops the scheduler, in-flight passes are rolled back by the database.
    pub async fn shutdown(&mut self) -> Result<(), Error> {
        self.sched.shutdown().await?;
        Ok(())
    }
}
