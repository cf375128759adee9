//! Utility functions and helpers for server operations.
//!
//! This module provides reusable helpers shared across services and the scheduler, such as
//! converting the millisecond timestamps stored on killmails and battles into dates.

pub mod time;
