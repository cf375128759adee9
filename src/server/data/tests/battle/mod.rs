mod delete_many;
mod get_battles_within_range;
mod get_earliest_unclustered_timestamp;
mod list;
mod reassign_killmails;

use serde_json::json;

use super::*;
