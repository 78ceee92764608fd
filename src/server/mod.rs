//! Server-side API backend and business logic.
//!
//! The backend uses Axum as the web framework and SeaORM for persistence. Authentication
//! is stateless: every protected request carries a JWT bearer token.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business rules, notifications and outgoing email
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models, filters and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Bearer token authentication guard
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB pool, token signer, email, calendar)
//! - **Startup** (`startup`) - Database connection, migrations and state assembly
//! - **Router** (`router`) - Route table, CORS, tracing and OpenAPI documentation
//! - **Scheduler** (`scheduler/`) - Cron jobs for session housekeeping and cleanup
//!
//! # Request Flow
//!
//! 1. **Router** receives the request and routes it to a controller
//! 2. **Controller** authenticates through `AuthGuard`, validates the body, calls the service
//! 3. **Service** applies business rules and orchestrates repositories
//! 4. **Data** queries the database and converts entities to domain models
//! 5. **Controller** converts the domain model to a DTO inside the response envelope

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
