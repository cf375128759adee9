use std::{fmt::Display, str::FromStr};

use chrono::Duration;

use crate::server::{error::config::ConfigError, service::battle::ClusteringConfig};

/// Runs the battle clustering pass every 5 minutes by default.
pub const DEFAULT_CLUSTER_CRON: &str = "0 */5 * * * *";

pub struct Config {
    pub database_url: String,
    /// Cron expression for the battle clustering pass
    pub cluster_cron: String,
    pub clustering: ClusteringConfig,
}

impl Config {
    /// Reads configuration from environment variables
    ///
    /// # Variables
    /// - `DATABASE_URL` (required)
    /// - `BATTLE_CLUSTER_CRON` (default `0 */5 * * * *`)
    /// - `BATTLE_WINDOW_MINUTES` (default 20)
    /// - `BATTLE_PAGE_SIZE` (default 300)
    /// - `BATTLE_BATCH_SIZE` (default 300)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads configuration using the provided variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let cluster_cron =
            lookup("BATTLE_CLUSTER_CRON").unwrap_or_else(|| DEFAULT_CLUSTER_CRON.to_string());

        let window_minutes: i64 = parse_positive(
            &lookup,
            "BATTLE_WINDOW_MINUTES",
            ClusteringConfig::DEFAULT_WINDOW.num_minutes(),
        )?;
        let page_size: u64 = parse_positive(
            &lookup,
            "BATTLE_PAGE_SIZE",
            ClusteringConfig::DEFAULT_PAGE_SIZE,
        )?;
        let batch_size: usize = parse_positive(
            &lookup,
            "BATTLE_BATCH_SIZE",
            ClusteringConfig::DEFAULT_BATCH_SIZE,
        )?;

        let window = Duration::try_minutes(window_minutes).ok_or_else(|| {
            ConfigError::InvalidEnvValue {
                var: "BATTLE_WINDOW_MINUTES".to_string(),
                reason: format!("{} minutes is out of range", window_minutes),
            }
        })?;

        Ok(Self {
            database_url,
            cluster_cron,
            clustering: ClusteringConfig {
                window,
                page_size,
                batch_size,
                ..ClusteringConfig::default()
            },
        })
    }
}

fn parse_positive<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + Default,
    T::Err: Display,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };

    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        })?;

    if value <= T::default() {
        return Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok(value)
}
