//! Killmail and battle payload types.
//!
//! Killmails and battles both carry a JSON blob listing the participants involved and the
//! locations the fighting happened in. These types are the typed view of those blobs along
//! with the merge rules used when killmails are clustered into a battle.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::server::{error::Error, model::db::KillmailModel};

/// ISK value lost by a participant.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Loss {
    pub value: f64,
}

/// A single pilot taking part in a fight.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corporation_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alliance_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_id: Option<i64>,
    /// Present only for the participant whose ship was destroyed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss: Option<Loss>,
}

impl Participant {
    fn key(&self) -> (Option<i64>, Option<i64>) {
        (self.character_id, self.ship_id)
    }
}

/// Payload stored with each killmail.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct KillmailData {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub locations: Vec<i64>,
}

/// Merged payload stored with each battle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BattleData {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub locations: Vec<i64>,
}

impl BattleData {
    /// Decodes battle data from its stored JSON representation.
    pub fn from_json(value: Value) -> Result<Self, Error> {
        Ok(serde_json::from_value(value)?)
    }

    /// Encodes battle data for storage.
    pub fn to_json(&self) -> Result<Value, Error> {
        Ok(serde_json::to_value(self)?)
    }

    /// Adds the participants & locations of a killmail to this battle.
    pub fn add_killmail(&mut self, killmail: KillmailData) {
        self.merge_parts(killmail.participants, killmail.locations);
    }

    /// Folds another battle's data into this one.
    pub fn merge(&mut self, other: BattleData) {
        self.merge_parts(other.participants, other.locations);
    }

    // Participants with a loss are always kept since every loss is a distinct event. A
    // participant without a loss is only recorded once per (character, ship) and is
    // replaced if the same pilot later shows up with a loss in that ship.
    fn merge_parts(&mut self, participants: Vec<Participant>, locations: Vec<i64>) {
        let mut seen: HashMap<(Option<i64>, Option<i64>), usize> = HashMap::new();
        for (index, participant) in self.participants.iter().enumerate() {
            seen.entry(participant.key()).or_insert(index);
        }

        for participant in participants {
            match seen.get(&participant.key()).copied() {
                None => {
                    seen.insert(participant.key(), self.participants.len());
                    self.participants.push(participant);
                }
                Some(index) => {
                    if participant.loss.is_none() {
                        continue;
                    }
                    if self.participants[index].loss.is_none() {
                        self.participants[index] = participant;
                    } else {
                        self.participants.push(participant);
                    }
                }
            }
        }

        self.locations.extend(locations);
        self.locations.sort_unstable();
        self.locations.dedup();
    }
}

/// A killmail decoded for clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct Killmail {
    pub id: i64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub data: KillmailData,
}

impl TryFrom<KillmailModel> for Killmail {
    type Error = Error;

    fn try_from(model: KillmailModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            timestamp: model.timestamp,
            data: serde_json::from_value(model.data)?,
        })
    }
}

/// Battle columns usable for ordering & bounding battle listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleColumn {
    Id,
    Start,
    End,
}

/// Sort direction for battle listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Comparison applied by a [`BattleBound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundCmp {
    Lt,
    Gt,
    Lte,
    Gte,
}

/// Restricts a battle listing to rows where `column <cmp> value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleBound {
    pub column: BattleColumn,
    pub cmp: BoundCmp,
    pub value: i64,
}

/// Filter for listing battles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattleFilter {
    pub id: Option<i32>,
    pub order_by: Vec<(BattleColumn, SortOrder)>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub bound: Option<BattleBound>,
}
