//! Error types for the Skirmish server application.
//!
//! This module provides the error handling system for the battle clustering engine, with
//! specialized error types for configuration and clustering failures. All errors use
//! `thiserror` for ergonomic definitions with automatic `Display` and `Error` implementations.

pub mod battle;
pub mod config;
pub mod retry;

use thiserror::Error;

use crate::server::error::{battle::BattleError, config::ConfigError};

/// Main error type for the Skirmish server application.
///
/// This enum aggregates all domain-specific error types and external library errors into a
/// single unified error type. It uses `thiserror`'s `#[from]` attribute to enable automatic
/// conversion from underlying error types via the `?` operator.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Battle clustering errors (lock contention, invariant violations)
/// - External library errors (database, JSON payloads, scheduler)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Battle clustering error (lock contention, ordering or range invariant violations).
    #[error(transparent)]
    BattleError(#[from] BattleError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in Skirmish's code.
    ///
    /// This error should never occur in normal operation and indicates a programming error
    /// that needs to be reported as a GitHub issue.
    #[error("Internal error with Skirmish's code, please open a GitHub issue as this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Killmail or battle JSON payload could not be encoded or decoded.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}
