//! Server application models and type definitions.
//!
//! This module contains the data models shared between the repositories and the battle
//! clustering services: database model type aliases and the typed JSON payloads stored on
//! killmails and battles.

pub mod battle;
pub mod db;
