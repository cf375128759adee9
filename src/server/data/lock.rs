use sea_orm::{ConnectionTrait, DbBackend, DbErr, Statement};

/// Lock class used for advisory locks over every battle.
///
/// Postgres advisory locks are keyed by a pair of 32-bit integers, the first identifies the
/// kind of resource being locked and the second the resource itself.
const BATTLE_LOCK_CLASS: i32 = 0x6261_7474;

/// Resource kinds guarded by transaction scoped advisory locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockResource {
    Battle,
}

impl LockResource {
    fn class_id(self) -> i32 {
        match self {
            Self::Battle => BATTLE_LOCK_CLASS,
        }
    }
}

pub struct LockRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LockRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Attempts to acquire an exclusive advisory lock held until the surrounding transaction ends
    ///
    /// # Arguments
    /// - `resource`: Kind of resource to lock
    /// - `key`: Resource within that kind, `-1` by convention to lock every resource of the kind
    ///
    /// # Returns
    /// - `Ok(true)` - Lock acquired, released automatically on commit or rollback
    /// - `Ok(false)` - Another transaction currently holds the lock
    ///
    /// # Notes
    /// - Must be called with a transaction, on a plain connection Postgres releases the lock
    ///   as soon as the statement completes
    /// - SQLite serializes write transactions through its own database lock, no advisory lock
    ///   is taken there
    pub async fn try_acquire_transactional_lock(
        &self,
        resource: LockResource,
        key: i32,
    ) -> Result<bool, DbErr> {
        match self.db.get_database_backend() {
            DbBackend::Postgres => {
                let row = self
                    .db
                    .query_one_raw(Statement::from_sql_and_values(
                        DbBackend::Postgres,
                        "SELECT pg_try_advisory_xact_lock($1, $2) AS locked",
                        [resource.class_id().into(), key.into()],
                    ))
                    .await?;

                match row {
                    Some(row) => row.try_get::<bool>("", "locked"),
                    None => Ok(false),
                }
            }
            DbBackend::Sqlite => Ok(true),
            backend => Err(DbErr::Custom(format!(
                "Transactional advisory locks are not supported on {:?}",
                backend
            ))),
        }
    }
}
