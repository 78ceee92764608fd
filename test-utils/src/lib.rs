//! Study Buddy Test Utils
//!
//! Shared testing utilities for the study buddy server. Provides a builder for test
//! contexts backed by in-memory SQLite databases whose schemas are generated straight
//! from the SeaORM entities, plus factories for seeding rows.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn books_a_session() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new().with_session_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let buddy = factory::user::UserFactory::new(db).role("BUDDY").build().await?;
//!     // ...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
