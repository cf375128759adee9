//! Test fixture modules for database records and payloads.
//!
//! - `battle` - Killmail, battle & association records inserted into the test database
//! - `factory` - JSON payloads for killmails & participants

pub mod battle;
pub mod factory;
