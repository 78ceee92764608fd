//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` builder for customisation and a `create_*` shorthand
//! for defaults. Factories only insert rows; tables must already exist, so build the
//! context with the matching `TestBuilder` table group first.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let learner = factory::create_user(db).await?;
//! let buddy = factory::user::UserFactory::new(db)
//!     .role("BUDDY")
//!     .skills(["Calculus"])
//!     .build()
//!     .await?;
//! factory::create_availability(db, buddy.id, 1, "09:00", "17:00").await?;
//! ```

pub mod availability;
pub mod helpers;
pub mod notification;
pub mod session;
pub mod ticket;
pub mod user;

pub use availability::create_availability;
pub use notification::create_notification;
pub use session::create_session;
pub use ticket::create_ticket;
pub use user::{create_buddy, create_user};
