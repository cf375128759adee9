//! Server application core modules.
//!
//! This module contains the battle clustering engine for Skirmish: the database repositories
//! for killmails & battles, the streaming clustering pipeline, the cron scheduler that runs it
//! periodically and the configuration & startup helpers the binary wires together.

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
