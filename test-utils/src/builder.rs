use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Add entity tables with `with_table()` or one of the table-group helpers, then call
/// `build()` to get a `TestContext` with the schema created.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Availability};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Availability)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the entity using SQLite syntax. Tables
    /// with foreign keys must be added after the tables they reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the user table and every table that only depends on it.
    ///
    /// Tables: User, UserSkill, Availability, UserAddress, VerificationDocument.
    pub fn with_user_tables(self) -> Self {
        self.with_table(User)
            .with_table(UserSkill)
            .with_table(Availability)
            .with_table(UserAddress)
            .with_table(VerificationDocument)
    }

    /// Adds the tables needed for booking and notifying about sessions.
    ///
    /// Equivalent to `with_user_tables()` plus Session and Notification.
    pub fn with_session_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Session)
            .with_table(Notification)
    }

    /// Adds every table in the schema.
    ///
    /// Use this for services that touch both sessions and tickets, such as stats.
    pub fn with_all_tables(self) -> Self {
        self.with_session_tables()
            .with_table(Ticket)
            .with_table(TicketComment)
    }

    /// Builds the test context and creates the configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
