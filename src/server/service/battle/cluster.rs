//! Single-link temporal clustering of killmails into battles.
//!
//! Killmails arrive in ascending (timestamp, killmail ID) order. Each one joins the open
//! bucket whose time range lies within the window of it, or opens a new bucket when none
//! does. When a killmail reaches several buckets it bridges them and they are merged into
//! one. Buckets are never merged otherwise, stored battles close to one another stay apart
//! unless a new killmail connects them. Once the stream has moved more than the window past
//! a bucket's end, no later killmail can reach it and the bucket is handed back to be
//! persisted.

use crate::server::{
    error::{battle::BattleError, Error},
    model::{
        battle::{BattleData, Killmail},
        db::BattleModel,
    },
};

/// In-memory battle being assembled during a clustering pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    /// Persisted battle this bucket extends, `None` for a battle that has yet to be stored
    pub battle_id: Option<i32>,
    /// Persisted battles merged into this one; their killmails move to `battle_id`
    pub absorbed: Vec<i32>,
    /// Earliest member timestamp (ms)
    pub start: i64,
    /// Latest member timestamp (ms)
    pub end: i64,
    /// Killmails added to the battle during this pass
    pub killmails: Vec<i64>,
    pub data: BattleData,
}

impl Bucket {
    fn seeded(battle: BattleModel) -> Result<Self, Error> {
        Ok(Self {
            battle_id: Some(battle.id),
            absorbed: Vec::new(),
            start: battle.start,
            end: battle.end,
            killmails: Vec::new(),
            data: BattleData::from_json(battle.data)?,
        })
    }

    fn opened(killmail: Killmail) -> Self {
        let mut data = BattleData::default();
        data.add_killmail(killmail.data);

        Self {
            battle_id: None,
            absorbed: Vec::new(),
            start: killmail.timestamp,
            end: killmail.timestamp,
            killmails: vec![killmail.id],
            data,
        }
    }

    /// Whether persisting the bucket would change anything in the database.
    ///
    /// A pre-existing battle that gained no killmails and absorbed no other battle is left as is.
    pub fn has_changes(&self) -> bool {
        self.battle_id.is_none() || !self.killmails.is_empty() || !self.absorbed.is_empty()
    }

    // 0 when the timestamp falls inside the bucket's range
    fn distance_to(&self, timestamp: i64) -> i64 {
        if timestamp < self.start {
            self.start.saturating_sub(timestamp)
        } else {
            timestamp.saturating_sub(self.end).max(0)
        }
    }

    fn extend(&mut self, killmail: Killmail) {
        self.start = self.start.min(killmail.timestamp);
        self.end = self.end.max(killmail.timestamp);
        self.killmails.push(killmail.id);
        self.data.add_killmail(killmail.data);
    }

    // The lowest persisted battle ID survives, any other persisted ID is absorbed
    fn absorb(&mut self, other: Bucket) {
        let mut persisted: Vec<i32> = self.battle_id.into_iter().chain(other.battle_id).collect();
        persisted.sort_unstable();

        let mut persisted = persisted.into_iter();
        self.battle_id = persisted.next();
        self.absorbed.extend(persisted);
        self.absorbed.extend(other.absorbed);

        self.start = self.start.min(other.start);
        self.end = self.end.max(other.end);
        self.killmails.extend(other.killmails);
        self.data.merge(other.data);
    }

    fn validate(self) -> Result<Self, Error> {
        if self.start > self.end {
            return Err(BattleError::InvalidRange {
                start: self.start,
                end: self.end,
            }
            .into());
        }

        Ok(self)
    }
}

/// Stateful clustering transform over an ascending killmail stream.
///
/// Open buckets live in a small arena ordered by start. Merging buckets folds every bridged
/// arena slot into the one with the earliest start.
pub struct BattleClusterer {
    /// Max gap in ms between two killmails of the same battle, inclusive
    window: i64,
    open: Vec<Bucket>,
    last_seen: Option<(i64, i64)>,
}

impl BattleClusterer {
    /// Creates a clusterer seeded with pre-existing battles
    ///
    /// # Arguments
    /// - `seeds`: Persisted battles new killmails may extend or bridge between
    /// - `window`: Max gap in milliseconds between killmails of the same battle
    pub fn new(seeds: Vec<BattleModel>, window: i64) -> Result<Self, Error> {
        if window < 0 {
            return Err(Error::InternalError(format!(
                "Battle clustering window must not be negative, got {}ms",
                window
            )));
        }

        let mut open = seeds
            .into_iter()
            .map(Bucket::seeded)
            .collect::<Result<Vec<_>, _>>()?;
        open.sort_by_key(|bucket| (bucket.start, bucket.end));

        Ok(Self {
            window,
            open,
            last_seen: None,
        })
    }

    /// Number of buckets currently open
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Adds the next killmail of the stream
    ///
    /// # Returns
    /// - `Ok(buckets)` - Buckets no later killmail can reach, ordered by end
    /// - `Err(BattleError::UnorderedKillmail)` - Killmail does not come after the previous one
    pub fn push(&mut self, killmail: Killmail) -> Result<Vec<Bucket>, Error> {
        let position = (killmail.timestamp, killmail.id);
        if let Some(previous) = self.last_seen {
            if position <= previous {
                return Err(BattleError::UnorderedKillmail {
                    killmail_id: killmail.id,
                    timestamp: killmail.timestamp,
                    previous_killmail_id: previous.1,
                    previous_timestamp: previous.0,
                }
                .into());
            }
        }
        self.last_seen = Some(position);

        let timestamp = killmail.timestamp;
        let window = self.window;
        let (reachable, open): (Vec<Bucket>, Vec<Bucket>) = std::mem::take(&mut self.open)
            .into_iter()
            .partition(|bucket| bucket.distance_to(timestamp) <= window);
        self.open = open;

        // Every reachable bucket is bridged by the killmail
        let mut reachable = reachable.into_iter();
        let bucket = match reachable.next() {
            Some(mut bucket) => {
                for other in reachable {
                    bucket.absorb(other);
                }
                bucket.extend(killmail);
                bucket
            }
            None => Bucket::opened(killmail),
        };

        let index = self
            .open
            .partition_point(|open| (open.start, open.end) <= (bucket.start, bucket.end));
        self.open.insert(index, bucket);

        self.drain_finalized(timestamp)
    }

    /// Finalizes every bucket still open at the end of the stream, ordered by end
    pub fn finish(mut self) -> Result<Vec<Bucket>, Error> {
        let mut finalized = std::mem::take(&mut self.open);
        finalized.sort_by_key(|bucket| bucket.end);

        finalized.into_iter().map(Bucket::validate).collect()
    }

    fn drain_finalized(&mut self, timestamp: i64) -> Result<Vec<Bucket>, Error> {
        let window = self.window;
        let (mut finalized, open): (Vec<Bucket>, Vec<Bucket>) = std::mem::take(&mut self.open)
            .into_iter()
            .partition(|bucket| timestamp.saturating_sub(bucket.end) > window);

        self.open = open;
        finalized.sort_by_key(|bucket| bucket.end);

        finalized.into_iter().map(Bucket::validate).collect()
    }
}
