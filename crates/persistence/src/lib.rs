// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the LeaveDesk engine.
//!
//! The engine itself is pure: every transition yields a new state plus an
//! audit event, and this crate owns writing them down. [`StateStore`] is
//! the seam callers depend on; [`MemoryStore`] is the in-process
//! implementation, keeping an append-only event log alongside a JSON
//! snapshot of the latest state.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;

pub use error::PersistenceError;

use leavedesk::{State, TransitionResult};
use time::Date;
use tracing::{debug, info};

/// An audit event as written to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEvent {
    /// Monotonically increasing event id, starting at 1.
    pub id: i64,
    /// The acting user's id.
    pub actor_user_id: i64,
    /// The role the actor held at the time.
    pub actor_role: String,
    /// The action name.
    pub action: String,
    /// Optional action details.
    pub details: Option<String>,
    /// The date the action was performed.
    pub recorded_on: Date,
    /// Snapshot summary before the transition.
    pub before: String,
    /// Snapshot summary after the transition.
    pub after: String,
}

/// Durable storage for engine state and its audit trail.
///
/// A commit writes the event and the state snapshot together; a partial
/// write never becomes visible to readers.
pub trait StateStore {
    /// Commits a transition: appends its audit event and replaces the
    /// latest state snapshot.
    ///
    /// Returns the id assigned to the stored event.
    ///
    /// # Errors
    ///
    /// Returns an error when the state cannot be serialized or the write
    /// fails.
    fn commit(&mut self, result: &TransitionResult) -> Result<i64, PersistenceError>;

    /// Loads the most recently committed state.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotNotFound` when nothing has been committed, or a
    /// deserialization error for a corrupt snapshot.
    fn load_latest(&self) -> Result<State, PersistenceError>;

    /// The full audit log, in commit order.
    fn events(&self) -> &[StoredEvent];

    /// Looks up a single stored event by id.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` when no event has the id.
    fn event(&self, event_id: i64) -> Result<&StoredEvent, PersistenceError>;
}

/// In-process store backing the engine with a `Vec` event log and a JSON
/// snapshot of the latest state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    events: Vec<StoredEvent>,
    snapshot: Option<String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            snapshot: None,
        }
    }
}

impl StateStore for MemoryStore {
    fn commit(&mut self, result: &TransitionResult) -> Result<i64, PersistenceError> {
        // Serialize before touching the log so a failure leaves the store
        // unchanged.
        let snapshot: String = serde_json::to_string(&result.new_state)?;

        let id: i64 = i64::try_from(self.events.len())
            .map_err(|err| PersistenceError::Other(err.to_string()))?
            + 1;
        let event: StoredEvent = StoredEvent {
            id,
            actor_user_id: result.audit_event.actor.user_id.value(),
            actor_role: result.audit_event.actor.role.as_str().to_string(),
            action: result.audit_event.action.name.clone(),
            details: result.audit_event.action.details.clone(),
            recorded_on: result.audit_event.recorded_on,
            before: result.audit_event.before.data.clone(),
            after: result.audit_event.after.data.clone(),
        };

        debug!(event_id = id, bytes = snapshot.len(), "serialized state snapshot");
        info!(event_id = id, action = %event.action, "committing transition");
        self.events.push(event);
        self.snapshot = Some(snapshot);
        Ok(id)
    }

    fn load_latest(&self) -> Result<State, PersistenceError> {
        let snapshot: &String = self
            .snapshot
            .as_ref()
            .ok_or(PersistenceError::SnapshotNotFound)?;
        Ok(serde_json::from_str(snapshot)?)
    }

    fn events(&self) -> &[StoredEvent] {
        &self.events
    }

    fn event(&self, event_id: i64) -> Result<&StoredEvent, PersistenceError> {
        self.events
            .iter()
            .find(|event| event.id == event_id)
            .ok_or(PersistenceError::EventNotFound(event_id))
    }
}
