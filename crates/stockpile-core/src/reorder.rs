//! # Reorder Email Composition
//!
//! Builds the reorder email sent to an item's supplier. Pure string
//! assembly; actually launching a mail client is the collaborator's job.

use serde::Serialize;

/// A composed reorder email, ready to hand to a mail client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderEmail {
    /// Recipient address (the item's supplier email).
    pub to: String,
    /// Subject line: `Order For: <item name>`.
    pub subject: String,
    /// Plain-text body asking for the given number of units.
    pub body: String,
}

impl ReorderEmail {
    /// The `mailto:` form of the recipient.
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.to)
    }
}

/// Composes a reorder email for `quantity` units of the named item.
///
/// ## Example
/// ```rust
/// use stockpile_core::reorder::compose;
///
/// let email = compose("Laptop Hp", "mail@example.com", 5);
/// assert_eq!(email.subject, "Order For: Laptop Hp");
/// assert!(email.body.contains("5 units of Laptop Hp"));
/// ```
pub fn compose(name: &str, supplier_email: &str, quantity: i64) -> ReorderEmail {
    ReorderEmail {
        to: supplier_email.trim().to_string(),
        subject: format!("Order For: {name}"),
        body: format!("Please send {quantity} units of {name}.\n\nThank you."),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_subject_body_and_mailto() {
        let email = compose("Laptop Hp", " mail@example.com ", 3);
        assert_eq!(email.to, "mail@example.com");
        assert_eq!(email.mailto(), "mailto:mail@example.com");
        assert_eq!(email.subject, "Order For: Laptop Hp");
        assert_eq!(email.body, "Please send 3 units of Laptop Hp.\n\nThank you.");
    }
}
