//! Test utilities for Skirmish.
//!
//! Tests are set up in two phases: a [`TestBuilder`] declares the tables & fixtures a test
//! needs, then `build()` returns a [`TestContext`] holding an in-memory SQLite database with
//! everything inserted.

pub mod builder;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{fixtures::factory, TestBuilder, TestContext, TestError};
}
