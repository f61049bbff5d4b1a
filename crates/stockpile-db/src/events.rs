//! # Change Events
//!
//! Fire-and-forget notifications that data at a given addressing may have
//! changed.
//!
//! ## Delivery Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Change Notification Flow                       │
//! │                                                                     │
//! │  gateway.insert/update/delete succeeds with rows affected           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  broadcast::Sender<ChangeEvent>  (owned by the Database instance)   │
//! │       │                                                             │
//! │       ├──► Receiver A (e.g. a list view refreshing itself)          │
//! │       └──► Receiver B                                               │
//! │                                                                     │
//! │  Best-effort: lagging receivers drop events, absent receivers are   │
//! │  ignored, and there is no ordering contract between events.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The channel is scoped to one `Database` instance; there is no
//! process-wide listener registry.

use tokio::sync::broadcast;

use stockpile_core::Addressing;

/// Buffered events per receiver before old ones are dropped.
pub(crate) const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// A signal that data at `addressing` may have changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The addressing the mutation was issued against. Inserts always carry
    /// the collection addressing.
    pub addressing: Addressing,
}

impl ChangeEvent {
    /// Whether an observer watching `watched` should react to this event.
    ///
    /// An observer of a specific item also reacts to collection-wide events
    /// (a bulk delete touches every item); an observer of the collection
    /// reacts to everything.
    pub fn affects(&self, watched: &Addressing) -> bool {
        match (self.addressing, watched) {
            (_, Addressing::Collection) => true,
            (Addressing::Collection, Addressing::Item(_)) => true,
            (Addressing::Item(changed), Addressing::Item(observed)) => changed == *observed,
        }
    }
}

/// Creates the change channel for one `Database` instance.
pub(crate) fn channel() -> broadcast::Sender<ChangeEvent> {
    broadcast::channel(CHANGE_CHANNEL_CAPACITY).0
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affects_matrix() {
        let on_item = ChangeEvent {
            addressing: Addressing::Item(1),
        };
        let on_collection = ChangeEvent {
            addressing: Addressing::Collection,
        };

        assert!(on_item.affects(&Addressing::Collection));
        assert!(on_item.affects(&Addressing::Item(1)));
        assert!(!on_item.affects(&Addressing::Item(2)));

        assert!(on_collection.affects(&Addressing::Collection));
        assert!(on_collection.affects(&Addressing::Item(7)));
    }

    #[test]
    fn send_without_receivers_is_a_no_op() {
        let tx = channel();
        // Fire-and-forget contract: nobody listening is not an error path.
        let _ = tx.send(ChangeEvent {
            addressing: Addressing::Collection,
        });
    }
}
