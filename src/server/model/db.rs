//! Database model type aliases.
//!
//! This module provides convenient type aliases for SeaORM database entity models used
//! throughout the application. These aliases give a single point of reference for database
//! model types without importing from the generated `entity` crate directly.

/// Type alias for the killmail database model.
///
/// Represents a single ship loss. Killmails are written by the ingestion process and are
/// only ever read by the battle clustering engine.
///
/// # Fields (from `entity::killmail::Model`)
/// - `id` - EVE Online killmail ID, primary key
/// - `timestamp` - Time of the loss in milliseconds since the Unix epoch
/// - `data` - JSON encoded [`KillmailData`](super::battle::KillmailData)
/// - `created_at` - Timestamp when the killmail was stored
pub type KillmailModel = entity::killmail::Model;

/// Type alias for the battle database model.
///
/// # Fields (from `entity::battle::Model`)
/// - `id` - Primary key, unique battle identifier
/// - `start` - Timestamp of the earliest member killmail (ms since epoch)
/// - `end` - Timestamp of the latest member killmail (ms since epoch)
/// - `data` - JSON encoded [`BattleData`](super::battle::BattleData)
/// - `created_at` - Timestamp when the battle was first created
/// - `updated_at` - Timestamp of the last time a clustering pass changed the battle
pub type BattleModel = entity::battle::Model;
