use futures::{
    stream::{self, Stream},
    TryStreamExt,
};
use sea_orm::ConnectionTrait;

use crate::server::{
    data::battle::BattleRepository,
    error::Error,
    model::{
        battle::Killmail,
        db::{BattleModel, KillmailModel},
    },
};

/// Read side of the clustering pass: unclustered killmails & the battles they may extend.
pub struct KillmailSource<'a, C: ConnectionTrait> {
    db: &'a C,
}

enum Cursor {
    Start,
    After(i64, i64),
    Done,
}

impl<'a, C: ConnectionTrait> KillmailSource<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Timestamp of the first unclustered killmail, `None` if the backlog is empty
    pub async fn earliest_unclustered_timestamp(&self) -> Result<Option<i64>, Error> {
        Ok(BattleRepository::new(self.db)
            .get_earliest_unclustered_timestamp()
            .await?)
    }

    /// Pre-existing battles intersecting [start, end], ordered by start
    pub async fn battles_overlapping(
        &self,
        start: i64,
        end: i64,
    ) -> Result<Vec<BattleModel>, Error> {
        Ok(BattleRepository::new(self.db)
            .get_battles_within_range(start, end)
            .await?)
    }

    /// Lazily streams every unclustered killmail ordered by (timestamp, killmail ID)
    ///
    /// Killmails are fetched `page_size` at a time and the next page is only requested once
    /// the previous one has been consumed. Each call starts over from the first unclustered
    /// killmail.
    ///
    /// Returns Err(Error::InternalError) for a page size of 0.
    pub fn unclustered_killmails(
        &self,
        page_size: u64,
    ) -> Result<impl Stream<Item = Result<Killmail, Error>> + 'a, Error> {
        if page_size == 0 {
            return Err(Error::InternalError(
                "Killmail source requires a page size of at least 1".to_string(),
            ));
        }

        let db = self.db;

        Ok(stream::try_unfold(Cursor::Start, move |cursor| {
            fetch_page(db, cursor, page_size)
        })
        .map_ok(|page| stream::iter(page.into_iter().map(Killmail::try_from)))
        .try_flatten())
    }
}

async fn fetch_page<C: ConnectionTrait>(
    db: &C,
    cursor: Cursor,
    page_size: u64,
) -> Result<Option<(Vec<KillmailModel>, Cursor)>, Error> {
    let after = match cursor {
        Cursor::Start => None,
        Cursor::After(timestamp, killmail_id) => Some((timestamp, killmail_id)),
        Cursor::Done => return Ok(None),
    };

    let page = BattleRepository::new(db)
        .get_unclustered_page(after, page_size)
        .await?;

    // A short page means the backlog is exhausted, skip the extra empty query
    let next = match page.last() {
        None => return Ok(None),
        Some(_) if (page.len() as u64) < page_size => Cursor::Done,
        Some(last) => Cursor::After(last.timestamp, last.id),
    };

    Ok(Some((page, next)))
}
