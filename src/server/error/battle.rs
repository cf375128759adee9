use thiserror::Error;

/// Errors raised while clustering killmails into battles.
///
/// Apart from [`BattleError::LockUnavailable`], every variant represents a broken invariant.
/// These abort the clustering pass and roll back its transaction rather than attempting any
/// repair of battle or association state.
#[derive(Error, Debug)]
pub enum BattleError {
    /// Another clustering pass currently holds the battle lock.
    #[error("Another battle clustering pass is already running")]
    LockUnavailable,
    /// Killmails were not delivered in ascending (timestamp, killmail ID) order.
    #[error(
        "Killmail {killmail_id} at {timestamp} arrived after killmail {previous_killmail_id} at {previous_timestamp}"
    )]
    UnorderedKillmail {
        killmail_id: i64,
        timestamp: i64,
        previous_killmail_id: i64,
        previous_timestamp: i64,
    },
    /// A finalized battle has a start after its end.
    #[error("Battle range is inverted: start {start} is after end {end}")]
    InvalidRange { start: i64, end: i64 },
    /// A battle the clustering pass expected to update no longer exists.
    #[error("Battle {0} does not exist")]
    BattleNotFound(i32),
}
