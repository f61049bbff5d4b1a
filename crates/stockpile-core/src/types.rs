//! # Domain Types
//!
//! The item entity, the projected row record, and the three-state write
//! payload.
//!
//! ## Type Roles
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌─────────────────┐  ┌──────────────────┐  ┌───────────────────┐  │
//! │  │      Item       │  │    ItemRecord    │  │    ItemValues     │  │
//! │  │  ─────────────  │  │  ──────────────  │  │  ───────────────  │  │
//! │  │  full row,      │  │  query result;   │  │  write payload;   │  │
//! │  │  every field    │  │  fields optional │  │  each field is    │  │
//! │  │  populated      │  │  (projections)   │  │  Absent/Null/Set  │  │
//! │  └─────────────────┘  └──────────────────┘  └───────────────────┘  │
//! │                                                                     │
//! │  insert/update take ItemValues ──► gateway ──► query returns       │
//! │  ItemRecord ──► into_item() when the full projection was selected  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::contract::Column;

// =============================================================================
// Field
// =============================================================================

/// One slot of a write payload.
///
/// Mirrors a content-values bag: a field can be left out entirely, set to
/// null, or set to a value. Validation only ever inspects *present* fields
/// (`Null` or `Set`); absent fields are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field<T> {
    /// Not part of this write at all.
    #[default]
    Absent,
    /// Present in the write, explicitly null.
    Null,
    /// Present with a value.
    Set(T),
}

impl<T> Field<T> {
    /// Whether the field participates in the write (`Null` or `Set`).
    pub const fn is_present(&self) -> bool {
        !matches!(self, Field::Absent)
    }

    /// The value, when one is set.
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Field::Set(v) => Some(v),
            _ => None,
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// A fully-populated inventory item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier. Assigned exactly once at creation, never
    /// reused or changed.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Price as entered, decimal-as-string (e.g. "45,000"). Stored and
    /// compared as free-form text; see `validation` for the consequences.
    pub price: String,

    /// Units on hand. Never negative through the gateway's callers.
    pub quantity: i64,

    /// Image URI string. Opaque to every layer of this workspace.
    pub image: String,

    /// Supplier display name.
    pub supplier: String,

    /// Supplier contact address for reorder email.
    pub supplier_email: String,
}

impl Item {
    /// The full-row write payload for this item, as the editor's save path
    /// produces it.
    pub fn values(&self) -> ItemValues {
        ItemValues::new()
            .name(self.name.clone())
            .price(self.price.clone())
            .quantity(self.quantity)
            .image(self.image.clone())
            .supplier(self.supplier.clone())
            .supplier_email(self.supplier_email.clone())
    }
}

// =============================================================================
// ItemRecord
// =============================================================================

/// One row of a query result.
///
/// Every field is optional: a projection may have selected only a subset of
/// columns, and `price`/`image` are nullable at the storage layer. A record
/// produced from the full projection converts to [`Item`] via
/// [`ItemRecord::into_item`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ItemRecord {
    #[cfg_attr(feature = "sqlx", sqlx(default))]
    pub id: Option<i64>,
    #[cfg_attr(feature = "sqlx", sqlx(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "sqlx", sqlx(default))]
    pub price: Option<String>,
    #[cfg_attr(feature = "sqlx", sqlx(default))]
    pub quantity: Option<i64>,
    #[cfg_attr(feature = "sqlx", sqlx(default))]
    pub image: Option<String>,
    #[cfg_attr(feature = "sqlx", sqlx(default))]
    pub supplier: Option<String>,
    #[cfg_attr(feature = "sqlx", sqlx(default))]
    pub supplier_email: Option<String>,
}

impl ItemRecord {
    /// Converts a full-projection record into an [`Item`].
    ///
    /// Returns `None` when any column is missing from the projection or was
    /// null in storage.
    pub fn into_item(self) -> Option<Item> {
        Some(Item {
            id: self.id?,
            name: self.name?,
            price: self.price?,
            quantity: self.quantity?,
            image: self.image?,
            supplier: self.supplier?,
            supplier_email: self.supplier_email?,
        })
    }
}

// =============================================================================
// NewItem
// =============================================================================

/// A fully-validated insert payload.
///
/// Produced only by `validation::validate_insert`; holding one proves every
/// required field was present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub price: String,
    pub quantity: i64,
    pub image: String,
    pub supplier: String,
    pub supplier_email: String,
}

// =============================================================================
// ItemValues
// =============================================================================

/// The write payload for insert and update operations.
///
/// Builder-style setters mark a field `Set`; leave a field untouched to keep
/// it out of the write. `Null` is only ever constructed explicitly (struct
/// fields are public) — it models "present but null", which validation
/// treats differently from absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemValues {
    pub name: Field<String>,
    pub price: Field<String>,
    pub quantity: Field<i64>,
    pub image: Field<String>,
    pub supplier: Field<String>,
    pub supplier_email: Field<String>,
}

impl ItemValues {
    /// An empty payload (every field absent).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the item name.
    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.name = Field::Set(v.into());
        self
    }

    /// Sets the price string.
    pub fn price(mut self, v: impl Into<String>) -> Self {
        self.price = Field::Set(v.into());
        self
    }

    /// Sets the quantity.
    pub fn quantity(mut self, v: i64) -> Self {
        self.quantity = Field::Set(v);
        self
    }

    /// Sets the image URI string.
    pub fn image(mut self, v: impl Into<String>) -> Self {
        self.image = Field::Set(v.into());
        self
    }

    /// Sets the supplier name.
    pub fn supplier(mut self, v: impl Into<String>) -> Self {
        self.supplier = Field::Set(v.into());
        self
    }

    /// Sets the supplier email address.
    pub fn supplier_email(mut self, v: impl Into<String>) -> Self {
        self.supplier_email = Field::Set(v.into());
        self
    }

    /// Whether no field at all is part of this write.
    ///
    /// An update with an empty payload is a no-op by contract: zero rows
    /// affected, no store call, no notification.
    pub fn is_empty(&self) -> bool {
        self.present_columns().is_empty()
    }

    /// The columns present in this write, in schema order.
    pub fn present_columns(&self) -> Vec<Column> {
        let mut cols = Vec::new();
        if self.name.is_present() {
            cols.push(Column::Name);
        }
        if self.price.is_present() {
            cols.push(Column::Price);
        }
        if self.quantity.is_present() {
            cols.push(Column::Quantity);
        }
        if self.image.is_present() {
            cols.push(Column::Image);
        }
        if self.supplier.is_present() {
            cols.push(Column::Supplier);
        }
        if self.supplier_email.is_present() {
            cols.push(Column::SupplierEmail);
        }
        cols
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> Item {
        Item {
            id: 1,
            name: "Laptop Hp".into(),
            price: "45,000".into(),
            quantity: 1,
            image: "res://drawable/laptop_image".into(),
            supplier: "raj".into(),
            supplier_email: "mail@example.com".into(),
        }
    }

    #[test]
    fn field_presence() {
        assert!(!Field::<i64>::Absent.is_present());
        assert!(Field::<i64>::Null.is_present());
        assert!(Field::Set(3).is_present());
        assert_eq!(Field::Set(3).as_set(), Some(&3));
        assert_eq!(Field::<i64>::Null.as_set(), None);
    }

    #[test]
    fn values_builder_marks_fields_present() {
        let values = ItemValues::new().name("Pen").quantity(4);
        assert_eq!(
            values.present_columns(),
            vec![Column::Name, Column::Quantity]
        );
        assert!(!values.is_empty());
        assert!(ItemValues::new().is_empty());
    }

    #[test]
    fn item_round_trips_through_values() {
        let item = sample_item();
        let values = item.values();
        assert_eq!(values.name.as_set(), Some(&item.name));
        assert_eq!(values.quantity.as_set(), Some(&item.quantity));
        assert_eq!(values.present_columns().len(), 6);
    }

    #[test]
    fn full_record_converts_to_item() {
        let item = sample_item();
        let record = ItemRecord {
            id: Some(item.id),
            name: Some(item.name.clone()),
            price: Some(item.price.clone()),
            quantity: Some(item.quantity),
            image: Some(item.image.clone()),
            supplier: Some(item.supplier.clone()),
            supplier_email: Some(item.supplier_email.clone()),
        };
        assert_eq!(record.into_item(), Some(item));
    }

    #[test]
    fn partial_record_does_not_convert() {
        let record = ItemRecord {
            id: Some(1),
            name: Some("Pen".into()),
            ..ItemRecord::default()
        };
        assert_eq!(record.into_item(), None);
    }
}
