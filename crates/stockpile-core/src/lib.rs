//! # stockpile-core: Pure Contract & Logic for Stockpile
//!
//! This crate is the I/O-free half of Stockpile. It defines the schema and
//! addressing contract for the single `items` table, the write-payload types
//! and their validation rules, and reorder-email composition.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Stockpile Architecture                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                       CLI (apps/cli)                          │ │
//! │  │      list ──► show ──► add/edit ──► sell/restock ──► order    │ │
//! │  └───────────────────────────────┬───────────────────────────────┘ │
//! │                                  │                                 │
//! │  ┌───────────────────────────────▼───────────────────────────────┐ │
//! │  │              ★ stockpile-core (THIS CRATE) ★                  │ │
//! │  │                                                               │ │
//! │  │  ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌───────────────┐  │ │
//! │  │  │ contract │ │  types   │ │ validation │ │    reorder    │  │ │
//! │  │  │ columns  │ │  Item    │ │  insert/   │ │  mailto +     │  │ │
//! │  │  │ address  │ │  values  │ │  update    │ │  subject/body │  │ │
//! │  │  └──────────┘ └──────────┘ └────────────┘ └───────────────┘  │ │
//! │  │                                                               │ │
//! │  │        NO I/O • NO DATABASE • PURE FUNCTIONS                  │ │
//! │  └───────────────────────────────┬───────────────────────────────┘ │
//! │                                  │                                 │
//! │  ┌───────────────────────────────▼───────────────────────────────┐ │
//! │  │               stockpile-db (Database Layer)                   │ │
//! │  │          SQLite pool, migrations, item gateway                │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`contract`] - Table/column constants, addressing forms, content kinds
//! - [`types`] - `Item`, projected `ItemRecord`, three-state `ItemValues`
//! - [`validation`] - Insert/update payload validation
//! - [`reorder`] - Reorder email composition
//! - [`error`] - Validation error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod contract;
pub mod error;
pub mod reorder;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockpile_core::Addressing` instead of
// `use stockpile_core::contract::Addressing`

pub use contract::{Addressing, AddressingError, Column, ContentKind};
pub use error::ValidationError;
pub use reorder::ReorderEmail;
pub use types::{Field, Item, ItemRecord, ItemValues, NewItem};
