//! # Validation Error Types
//!
//! User-input validation failures for item writes.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  stockpile-core (this file)                                         │
//! │  └── ValidationError  - A write payload failed field validation     │
//! │                                                                     │
//! │  stockpile-db (separate crate)                                      │
//! │  ├── DbError          - Storage-layer failures                      │
//! │  └── GatewayError     - Validation ∪ Addressing ∪ Storage           │
//! │                                                                     │
//! │  Flow: ValidationError → GatewayError → caller-facing message       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation failures are user-input errors: reported to the caller,
//! never retried, never logged as system faults. The whole operation
//! aborts; there is no partial write.

use thiserror::Error;

/// A write payload failed validation.
///
/// `field` names the offending attribute ("price", "quantity", "name",
/// "image", "supplier", "email").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing (absent, or present but null).
    #[error("Item requires a {field}")]
    MissingField { field: &'static str },

    /// A field is present but carries an unacceptable value.
    #[error("Item requires a valid {field}")]
    InvalidField { field: &'static str },
}

impl ValidationError {
    /// Creates a MissingField error.
    pub const fn missing(field: &'static str) -> Self {
        ValidationError::MissingField { field }
    }

    /// Creates an InvalidField error.
    pub const fn invalid(field: &'static str) -> Self {
        ValidationError::InvalidField { field }
    }

    /// The offending field name.
    pub const fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field } => field,
            ValidationError::InvalidField { field } => field,
        }
    }
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        assert_eq!(
            ValidationError::missing("price").to_string(),
            "Item requires a price"
        );
        assert_eq!(
            ValidationError::invalid("price").to_string(),
            "Item requires a valid price"
        );
        assert_eq!(ValidationError::missing("email").field(), "email");
    }
}
