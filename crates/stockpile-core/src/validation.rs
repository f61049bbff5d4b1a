//! # Validation Module
//!
//! Write-payload validation for the item gateway.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: Collaborator (CLI editor)                                 │
//! │  ├── Non-empty string checks, typed argument parsing                │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: Item gateway (Rust)                                       │
//! │  └── THIS MODULE: presence and range rules per write kind           │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  └── NOT NULL constraints on name/quantity/supplier/supplier_email  │
//! │                                                                     │
//! │  price/image are nullable in storage; their non-null requirement    │
//! │  lives here, one layer up.                                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed validation aborts the whole operation: no partial insert, no
//! partial update.

use crate::error::{ValidationError, ValidationResult};
use crate::types::{Field, ItemValues, NewItem};

// =============================================================================
// Insert Validation
// =============================================================================

/// Validates a full insert payload, producing the typed row to store.
///
/// ## Rules (checked in this order; first failure wins)
/// 1. `price` present           → else `MissingField(price)`
/// 2. `quantity` present and ≥0 → else `MissingField(quantity)`
/// 3. `name` present            → else `MissingField(name)`
/// 4. `image` present           → else `MissingField(image)`
/// 5. `supplier` present        → else `MissingField(supplier)`
/// 6. `supplier_email` present  → else `MissingField(email)`
///
/// A present-but-negative quantity fails the same `MissingField(quantity)`
/// check as a missing one; it does not get its own `InvalidField`.
pub fn validate_insert(values: &ItemValues) -> ValidationResult<NewItem> {
    let price = values
        .price
        .as_set()
        .cloned()
        .ok_or(ValidationError::missing("price"))?;
    let quantity = match values.quantity {
        Field::Set(q) if q >= 0 => q,
        _ => return Err(ValidationError::missing("quantity")),
    };
    let name = values
        .name
        .as_set()
        .cloned()
        .ok_or(ValidationError::missing("name"))?;
    let image = values
        .image
        .as_set()
        .cloned()
        .ok_or(ValidationError::missing("image"))?;
    let supplier = values
        .supplier
        .as_set()
        .cloned()
        .ok_or(ValidationError::missing("supplier"))?;
    let supplier_email = values
        .supplier_email
        .as_set()
        .cloned()
        .ok_or(ValidationError::missing("email"))?;

    Ok(NewItem {
        name,
        price,
        quantity,
        image,
        supplier,
        supplier_email,
    })
}

// =============================================================================
// Update Validation
// =============================================================================

/// Validates a partial update payload.
///
/// Only fields *present* in the payload are checked; absent fields are
/// skipped entirely.
///
/// ## Rules
/// - `name` present but null     → `MissingField(name)`
/// - `quantity` present but null → `MissingField(quantity)`
/// - `price` present and parsing to a negative integer → `InvalidField(price)`
///
/// Price is stored as free-form text ("45,000"); only values that parse as a
/// plain integer are range-checked, so most real prices pass this guard
/// untouched.
pub fn validate_update(values: &ItemValues) -> ValidationResult<()> {
    if matches!(values.name, Field::Null) {
        return Err(ValidationError::missing("name"));
    }
    if matches!(values.quantity, Field::Null) {
        return Err(ValidationError::missing("quantity"));
    }
    if let Field::Set(price) = &values.price {
        if let Ok(n) = price.trim().parse::<i64>() {
            if n < 0 {
                return Err(ValidationError::invalid("price"));
            }
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn full_values() -> ItemValues {
        ItemValues::new()
            .name("Laptop Hp")
            .price("45,000")
            .quantity(1)
            .image("res://drawable/laptop_image")
            .supplier("raj")
            .supplier_email("mail@example.com")
    }

    #[test]
    fn insert_accepts_full_payload() {
        let new_item = validate_insert(&full_values()).unwrap();
        assert_eq!(new_item.name, "Laptop Hp");
        assert_eq!(new_item.price, "45,000");
        assert_eq!(new_item.quantity, 1);
        assert_eq!(new_item.supplier_email, "mail@example.com");
    }

    #[test]
    fn insert_rejects_each_missing_field() {
        let cases: [(fn(&mut ItemValues), &str); 6] = [
            (|v| v.price = Field::Absent, "price"),
            (|v| v.quantity = Field::Absent, "quantity"),
            (|v| v.name = Field::Null, "name"),
            (|v| v.image = Field::Absent, "image"),
            (|v| v.supplier = Field::Null, "supplier"),
            (|v| v.supplier_email = Field::Absent, "email"),
        ];
        for (strip, field) in cases {
            let mut values = full_values();
            strip(&mut values);
            assert_eq!(
                validate_insert(&values),
                Err(ValidationError::missing(field))
            );
        }
    }

    #[test]
    fn insert_checks_price_before_quantity() {
        // First failure wins, in declaration order.
        let mut values = full_values();
        values.price = Field::Absent;
        values.quantity = Field::Absent;
        assert_eq!(
            validate_insert(&values),
            Err(ValidationError::missing("price"))
        );
    }

    #[test]
    fn insert_folds_negative_quantity_into_missing() {
        let values = full_values().quantity(-1);
        assert_eq!(
            validate_insert(&values),
            Err(ValidationError::missing("quantity"))
        );
        assert!(validate_insert(&full_values().quantity(0)).is_ok());
    }

    #[test]
    fn update_skips_absent_fields() {
        assert!(validate_update(&ItemValues::new()).is_ok());
        assert!(validate_update(&ItemValues::new().quantity(9)).is_ok());
    }

    #[test]
    fn update_rejects_null_name_and_quantity() {
        let mut values = ItemValues::new();
        values.name = Field::Null;
        assert_eq!(
            validate_update(&values),
            Err(ValidationError::missing("name"))
        );

        let mut values = ItemValues::new();
        values.quantity = Field::Null;
        assert_eq!(
            validate_update(&values),
            Err(ValidationError::missing("quantity"))
        );
    }

    #[test]
    fn update_price_guard_only_bites_parseable_negatives() {
        assert_eq!(
            validate_update(&ItemValues::new().price("-5")),
            Err(ValidationError::invalid("price"))
        );
        // Free-form decimal strings do not parse as integers and pass.
        assert!(validate_update(&ItemValues::new().price("45,000")).is_ok());
        assert!(validate_update(&ItemValues::new().price("10")).is_ok());
        let mut values = ItemValues::new();
        values.price = Field::Null;
        assert!(validate_update(&values).is_ok());
    }
}
