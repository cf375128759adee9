//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};
use serde_json::Value;

use crate::{error::TestError, fixtures::factory, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables and
/// killmail & battle fixtures. Methods can be chained together and finalized with
/// `build()` to create a complete test setup.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_battle_tables: bool,

    // Database fixtures to insert
    killmails: Vec<(i64, i64, Value)>, // (killmail_id, timestamp, data)
    battles: Vec<(i64, i64)>,          // (start, end)
    associations: Vec<(i64, i32)>,     // (killmail_id, battle_id)
}

impl TestBuilder {
    /// Create a new TestBuilder.
    ///
    /// Initializes an empty builder with no tables or fixtures configured.
    ///
    /// # Returns
    /// - `TestBuilder` - A new builder instance ready for configuration
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_battle_tables: false,
            killmails: Vec::new(),
            battles: Vec::new(),
            associations: Vec::new(),
        }
    }

    /// Add the killmail, battle & killmail battle tables to the test database.
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_battle_tables(mut self) -> Self {
        self.include_battle_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    /// Chain multiple calls to add multiple tables.
    ///
    /// # Arguments
    /// - `entity` - Entity type implementing `EntityTrait`
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    ///
    /// # Example
    ///
    /// ```no_run
    /// use skirmish_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), skirmish_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Killmail)
    ///     .with_table(Battle)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a mock killmail into the database.
    ///
    /// Queues a killmail with a generated single victim & attacker payload.
    ///
    /// # Arguments
    /// - `killmail_id` - Killmail ID
    /// - `timestamp` - Time of the kill in milliseconds since the Unix epoch
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_mock_killmail(mut self, killmail_id: i64, timestamp: i64) -> Self {
        self.killmails.push((
            killmail_id,
            timestamp,
            factory::mock_killmail_data(killmail_id * 10, killmail_id * 10 + 1, 30_000_142),
        ));
        self
    }

    /// Insert a killmail with a custom payload into the database.
    pub fn with_killmail(mut self, killmail_id: i64, timestamp: i64, data: Value) -> Self {
        self.killmails.push((killmail_id, timestamp, data));
        self
    }

    /// Insert a mock battle into the database.
    ///
    /// Battles are inserted in the order they are declared, so the first declared battle
    /// receives ID 1, the second ID 2 and so on.
    ///
    /// # Arguments
    /// - `start` - Timestamp of the battle's earliest killmail
    /// - `end` - Timestamp of the battle's latest killmail
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_mock_battle(mut self, start: i64, end: i64) -> Self {
        self.battles.push((start, end));
        self
    }

    /// Associate a killmail with a battle.
    ///
    /// Both the killmail and the battle must be declared on the builder.
    pub fn with_association(mut self, killmail_id: i64, battle_id: i32) -> Self {
        self.associations.push((killmail_id, battle_id));
        self
    }

    /// Build the test setup by creating all configured tables & fixtures.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables (battle tables if specified, then custom tables)
    /// 2. Inserts killmails, then battles, then associations
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_battle_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Killmail),
                schema.create_table_from_entity(entity::prelude::Battle),
                schema.create_table_from_entity(entity::prelude::KillmailBattle),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for (killmail_id, timestamp, data) in self.killmails {
            setup
                .battle()
                .insert_killmail(killmail_id, timestamp, data)
                .await?;
        }

        for (start, end) in self.battles {
            setup.battle().insert_mock_battle(start, end).await?;
        }

        for (killmail_id, battle_id) in self.associations {
            setup
                .battle()
                .insert_association(killmail_id, battle_id)
                .await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
