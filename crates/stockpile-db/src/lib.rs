//! # stockpile-db: Database Layer for Stockpile
//!
//! This crate provides database access for the Stockpile inventory tracker.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Stockpile Data Flow                            │
//! │                                                                     │
//! │  CLI command (list / add / sell / ...)                              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                  stockpile-db (THIS CRATE)                    │ │
//! │  │                                                               │ │
//! │  │  ┌─────────────┐   ┌───────────────┐   ┌──────────────────┐  │ │
//! │  │  │  Database   │   │  ItemGateway  │   │    Migrations    │  │ │
//! │  │  │  (pool.rs)  │◄──│ (gateway.rs)  │   │    (embedded)    │  │ │
//! │  │  │             │   │               │   │                  │  │ │
//! │  │  │ SqlitePool  │   │ query/insert/ │   │ 001_initial_     │  │ │
//! │  │  │ lifecycle   │   │ update/delete │   │ schema.sql       │  │ │
//! │  │  └─────────────┘   └───────┬───────┘   └──────────────────┘  │ │
//! │  │                           │ change events (broadcast)        │ │
//! │  └───────────────────────────┼───────────────────────────────────┘ │
//! │       │                      ▼                                     │
//! │  ┌────▼──────────────────────────────────────────────────────────┐ │
//! │  │                      SQLite Database                          │ │
//! │  │   one file, one table: items                                  │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`gateway`] - The item access gateway (the only SQL issuer)
//! - [`events`] - Change-event broadcasting
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockpile_db::{Database, DbConfig};
//! use stockpile_core::{Addressing, ItemValues};
//!
//! let db = Database::new(DbConfig::new("path/to/inventory.db")).await?;
//! let gateway = db.items();
//!
//! let assigned = gateway
//!     .insert(&Addressing::Collection, ItemValues::new().name("Pen") /* ... */)
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod events;
pub mod gateway;
pub mod migrations;
pub mod pool;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use events::ChangeEvent;
pub use gateway::{GatewayError, GatewayResult, ItemGateway, QueryOptions};
pub use pool::{Database, DbConfig};
