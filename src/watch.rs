//! Change notifications for association mutations.
//!
//! Each subscriber gets its own bounded `crossbeam-channel` queue. Events
//! are published while the store's write lock is held, one per primary
//! edge that actually changed, so queues hold changes in commit order.
//! Publishing never blocks. Idempotent re-adds and no-op removals publish
//! nothing.
//!
//! # Example
//!
//! ```rust
//! use talentlink::{AssociationStore, ChangeKind, Config, EntityRef, RelationType};
//!
//! let store = AssociationStore::new(Config::default()).unwrap();
//! let watch = store.subscribe().unwrap();
//!
//! store
//!     .add_association(&EntityRef::company("comp1"), RelationType::Contacts, "contact1")
//!     .unwrap();
//!
//! let event = watch.try_recv().unwrap();
//! assert_eq!(event.kind, ChangeKind::Linked);
//! ```

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::association::Edge;
use crate::error::{AssocError, Result};
use crate::types::Timestamp;

/// What happened to an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// The edge (and its inverse) was created.
    Linked,
    /// The edge (and its inverse) was removed.
    Unlinked,
}

/// A single committed change to the association graph.
///
/// `edge` is given from the perspective of the caller's operation; the
/// inverse edge changed in the same step and is `edge.reversed()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationEvent {
    /// Link or unlink.
    pub kind: ChangeKind,

    /// The edge that changed.
    pub edge: Edge,

    /// When the change was applied.
    pub timestamp: Timestamp,
}

impl AssociationEvent {
    pub(crate) fn new(kind: ChangeKind, edge: Edge) -> Self {
        Self {
            kind,
            edge,
            timestamp: Timestamp::now(),
        }
    }
}

/// Receiving end of a subscription.
///
/// Dropping the watch unsubscribes; the store prunes it on the next publish.
#[derive(Debug)]
pub struct AssociationWatch {
    receiver: Receiver<AssociationEvent>,
}

impl AssociationWatch {
    /// Returns the next pending event without blocking.
    pub fn try_recv(&self) -> Option<AssociationEvent> {
        self.receiver.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event.
    ///
    /// Returns `None` on timeout or when the store has been dropped.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<AssociationEvent> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Drains every pending event without blocking.
    pub fn drain(&self) -> Vec<AssociationEvent> {
        self.receiver.try_iter().collect()
    }

    /// Number of events waiting in the queue.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

/// Fan-out of events to all live subscribers.
#[derive(Debug)]
pub(crate) struct WatchRegistry {
    capacity: usize,
    senders: Mutex<Vec<Sender<AssociationEvent>>>,
}

impl WatchRegistry {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            senders: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn subscribe(&self) -> Result<AssociationWatch> {
        let (sender, receiver) = bounded(self.capacity);
        self.senders
            .lock()
            .map_err(|_| AssocError::lock("Watch registry lock poisoned"))?
            .push(sender);
        debug!(capacity = self.capacity, "New association subscriber");
        Ok(AssociationWatch { receiver })
    }

    /// Delivers events to every subscriber, dropping events for full queues.
    ///
    /// Runs after a mutation has committed, so it never fails. A poisoned
    /// registry lock is recovered.
    pub(crate) fn publish(&self, events: &[AssociationEvent]) {
        if events.is_empty() {
            return;
        }

        let mut senders = self.senders.lock().unwrap_or_else(|poisoned| {
            warn!("Watch registry lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        });

        senders.retain(|sender| {
            for event in events {
                match sender.try_send(event.clone()) {
                    Ok(()) => {}
                    Err(TrySendError::Full(dropped)) => {
                        warn!(edge = %dropped.edge, "Watch queue full, dropping event");
                    }
                    Err(TrySendError::Disconnected(_)) => return false,
                }
            }
            true
        });
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.senders.lock().map_or(0, |s| s.len())
    }
}
