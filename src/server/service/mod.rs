//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer that implements the battle clustering pipeline
//! on top of the data repositories, along with the retry logic used by the scheduler.

pub mod battle;
pub mod retry;
