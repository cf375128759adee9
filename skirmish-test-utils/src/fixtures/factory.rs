use serde_json::{json, Value};

/// Create a participant payload.
///
/// # Arguments
/// - `character_id` - Pilot of the ship
/// - `ship_id` - Ship type flown
/// - `loss` - ISK value lost, `None` for an attacker
pub fn mock_participant(character_id: i64, ship_id: i64, loss: Option<f64>) -> Value {
    match loss {
        Some(value) => json!({
            "characterId": character_id,
            "corporationId": 98_000_000 + character_id,
            "shipId": ship_id,
            "loss": { "value": value }
        }),
        None => json!({
            "characterId": character_id,
            "corporationId": 98_000_000 + character_id,
            "shipId": ship_id
        }),
    }
}

/// Create a killmail payload with a single victim & attacker in one solar system.
///
/// # Arguments
/// - `victim_id` - Character ID of the pilot who lost their ship
/// - `attacker_id` - Character ID of the pilot who got the kill
/// - `solar_system_id` - Location of the kill
pub fn mock_killmail_data(victim_id: i64, attacker_id: i64, solar_system_id: i64) -> Value {
    json!({
        "participants": [
            mock_participant(victim_id, 587, Some(1_000_000.0)),
            mock_participant(attacker_id, 17_738, None),
        ],
        "locations": [solar_system_id]
    })
}
