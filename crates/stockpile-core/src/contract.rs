//! # Schema & Addressing Contract
//!
//! The fixed contract shared by the storage layer, the item gateway, and
//! every collaborator: the table name, the column set, and the two
//! addressing forms (whole collection, single item by id).
//!
//! ## Addressing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Addressing Forms                              │
//! │                                                                     │
//! │  "stockpile/items"      ──► Addressing::Collection (all items)      │
//! │  "stockpile/items/42"   ──► Addressing::Item(42)   (one item)       │
//! │  anything else          ──► AddressingError::Unknown                │
//! │                                                                     │
//! │  The string form exists for the boundary (CLI args, events in       │
//! │  logs); inside the process the enum is the only currency.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Table & Column Constants
// =============================================================================

/// Authority prefix of the addressing scheme.
pub const AUTHORITY: &str = "stockpile";

/// Path segment naming the item collection.
pub const PATH_ITEMS: &str = "items";

/// Name of the single backing table.
pub const TABLE_ITEMS: &str = "items";

/// A column of the `items` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Id,
    Name,
    Price,
    Quantity,
    Image,
    Supplier,
    SupplierEmail,
}

impl Column {
    /// Every column, in schema order.
    pub const ALL: [Column; 7] = [
        Column::Id,
        Column::Name,
        Column::Price,
        Column::Quantity,
        Column::Image,
        Column::Supplier,
        Column::SupplierEmail,
    ];

    /// The column name as it appears in SQL.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::Price => "price",
            Column::Quantity => "quantity",
            Column::Image => "image",
            Column::Supplier => "supplier",
            Column::SupplierEmail => "supplier_email",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Addressing
// =============================================================================

/// An opaque identifier denoting either the full item collection or one
/// specific item by id.
///
/// Replaces the platform URI mechanism with an ordinary tagged parameter.
/// `parse` is the only place an *unrecognized* form can surface; a value of
/// this type is recognized by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Addressing {
    /// All items: `stockpile/items`.
    Collection,
    /// One item by id: `stockpile/items/<id>`.
    Item(i64),
}

impl Addressing {
    /// Parses the string form of an addressing.
    ///
    /// ## Accepted Forms
    /// - `stockpile/items`
    /// - `stockpile/items/<id>` where `<id>` is a non-negative integer
    ///
    /// ## Errors
    /// `AddressingError::Unknown` for every other shape. This is a
    /// programmer/integration error: callers are expected to fail fast, not
    /// retry.
    pub fn parse(input: &str) -> Result<Self, AddressingError> {
        let mut segments = input.split('/');

        let unknown = || AddressingError::Unknown(input.to_string());

        if segments.next() != Some(AUTHORITY) {
            return Err(unknown());
        }
        if segments.next() != Some(PATH_ITEMS) {
            return Err(unknown());
        }

        match segments.next() {
            None => Ok(Addressing::Collection),
            Some(raw_id) if segments.next().is_none() => raw_id
                .parse::<i64>()
                .ok()
                .filter(|id| *id >= 0)
                .map(Addressing::Item)
                .ok_or_else(unknown),
            Some(_) => Err(unknown()),
        }
    }

    /// The item id, for item-level addressing.
    pub const fn item_id(&self) -> Option<i64> {
        match self {
            Addressing::Collection => None,
            Addressing::Item(id) => Some(*id),
        }
    }

    /// Content kind this addressing denotes.
    pub const fn kind(&self) -> ContentKind {
        match self {
            Addressing::Collection => ContentKind::Collection,
            Addressing::Item(_) => ContentKind::Single,
        }
    }
}

impl fmt::Display for Addressing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Addressing::Collection => write!(f, "{}/{}", AUTHORITY, PATH_ITEMS),
            Addressing::Item(id) => write!(f, "{}/{}/{}", AUTHORITY, PATH_ITEMS, id),
        }
    }
}

impl FromStr for Addressing {
    type Err = AddressingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Addressing::parse(s)
    }
}

/// Addressing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressingError {
    /// The string form matches neither addressing shape.
    #[error("unknown addressing: {0}")]
    Unknown(String),
}

// =============================================================================
// Content Kind
// =============================================================================

/// Content-type tag distinguishing "collection of items" from "single item".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// A sequence of item rows.
    Collection,
    /// Exactly one item row.
    Single,
}

impl ContentKind {
    /// Stable tag string for logs and external callers.
    pub const fn type_tag(&self) -> &'static str {
        match self {
            ContentKind::Collection => "vnd.stockpile.dir/items",
            ContentKind::Single => "vnd.stockpile.item/items",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_collection() {
        assert_eq!(
            Addressing::parse("stockpile/items").unwrap(),
            Addressing::Collection
        );
    }

    #[test]
    fn parse_item() {
        assert_eq!(
            Addressing::parse("stockpile/items/42").unwrap(),
            Addressing::Item(42)
        );
        assert_eq!(
            Addressing::parse("stockpile/items/0").unwrap(),
            Addressing::Item(0)
        );
    }

    #[test]
    fn parse_rejects_unknown_forms() {
        for bad in [
            "",
            "stockpile",
            "stockpile/other",
            "stockpile/items/abc",
            "stockpile/items/-3",
            "stockpile/items/1/extra",
            "elsewhere/items/1",
        ] {
            assert!(
                matches!(Addressing::parse(bad), Err(AddressingError::Unknown(_))),
                "expected Unknown for {bad:?}"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        for addr in [Addressing::Collection, Addressing::Item(7)] {
            let rendered = addr.to_string();
            assert_eq!(Addressing::parse(&rendered).unwrap(), addr);
        }
    }

    #[test]
    fn kind_matches_addressing() {
        assert_eq!(Addressing::Collection.kind(), ContentKind::Collection);
        assert_eq!(Addressing::Item(1).kind(), ContentKind::Single);
        assert_eq!(
            ContentKind::Collection.type_tag(),
            "vnd.stockpile.dir/items"
        );
        assert_eq!(ContentKind::Single.type_tag(), "vnd.stockpile.item/items");
    }

    #[test]
    fn column_names_match_schema_order() {
        let names: Vec<&str> = Column::ALL.iter().map(Column::as_str).collect();
        assert_eq!(
            names,
            [
                "id",
                "name",
                "price",
                "quantity",
                "image",
                "supplier",
                "supplier_email"
            ]
        );
    }
}
