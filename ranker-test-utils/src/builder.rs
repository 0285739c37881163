//! Declarative test builder for Phase 1 setup.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{constant::TEST_DEFAULT_ELO, error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables and
/// firm fixtures. Methods can be chained together and finalized with `build()` to
/// create a complete test setup.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_firm_table: bool,

    // Firm fixtures to insert (name, stage, elo_score)
    firms: Vec<(String, String, i32)>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
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
            include_firm_table: false,
            firms: Vec::new(),
        }
    }

    /// Add the firm table to the test database.
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_firm_table(mut self) -> Self {
        self.include_firm_table = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
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
    /// use ranker_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), ranker_test_utils::TestError> {
    /// let test = TestBuilder::new().with_table(Firm).build().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a firm with the default rating into the database.
    ///
    /// Implies [`Self::with_firm_table`].
    ///
    /// # Arguments
    /// - `name` - Unique firm name, also used to derive its website
    /// - `stage` - Category the firm belongs to
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_firm(self, name: impl Into<String>, stage: impl Into<String>) -> Self {
        self.with_rated_firm(name, stage, TEST_DEFAULT_ELO)
    }

    /// Insert a firm with a specific rating into the database.
    ///
    /// Implies [`Self::with_firm_table`].
    ///
    /// # Arguments
    /// - `name` - Unique firm name, also used to derive its website
    /// - `stage` - Category the firm belongs to
    /// - `elo_score` - Rating the firm starts at
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_rated_firm(
        mut self,
        name: impl Into<String>,
        stage: impl Into<String>,
        elo_score: i32,
    ) -> Self {
        self.include_firm_table = true;
        self.firms.push((name.into(), stage.into(), elo_score));
        self
    }

    /// Build the test setup by creating all configured tables and fixtures.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables (firm table if specified, then custom tables)
    /// 2. Inserts firm fixtures in the order they were added
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_firm_table {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.push(schema.create_table_from_entity(entity::prelude::Firm));
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for (name, stage, elo_score) in self.firms {
            setup
                .firm()
                .insert_rated_firm(&name, &stage, elo_score)
                .await?;
        }

        Ok(setup)
    }
}
