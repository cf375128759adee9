
use skirmish_test_utils::prelude::*;

use crate::server::{
    error::{battle::BattleError, Error},
    model::battle::{KillmailData, Participant},
    service::battle::cluster::Bucket,
};

use super::*;

/// Window used by the scenarios, 20 minutes in milliseconds
const WINDOW: i64 = 20 * 60 * 1000;

fn killmail(id: i64, timestamp: i64) -> crate::server::model::battle::Killmail {
    crate::server::model::battle::Killmail {
        id,
        timestamp,
        data: KillmailData {
            participants: vec![Participant {
                character_id: Some(id),
                ship_id: Some(587),
                ..Default::default()
            }],
            locations: vec![30_000_142],
        },
    }
}
