//! Optimistic mutator: an explicit per-field state machine for local-first edits.
//!
//! ```text
//! Idle -> apply -> OptimisticApplied -> acknowledge -> Idle
//!                                    -> fail -> Reverting -> finish_reconcile -> Idle
//! ```
//!
//! The mutator never talks to the network. The screen that owns the data drives
//! the transitions around its own request and re-fetch.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

/// Identifies one mutable field of one entity, e.g. (`onb-1`, `tasks.t3.completed`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditKey {
    pub entity_id: String,
    pub field_path: String,
}

impl EditKey {
    pub fn new(entity_id: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            field_path: field_path.into(),
        }
    }
}

impl fmt::Display for EditKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_id, self.field_path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    Idle,
    OptimisticApplied,
    Reverting,
}

/// A pending local edit. `previous` is the last value the server confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimisticEdit<V> {
    pub key: EditKey,
    pub previous: V,
    pub proposed: V,
    pub phase: EditPhase,
    seq: u64,
}

/// Handle for one applied edit; the server outcome is reported against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTicket {
    pub key: EditKey,
    seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckOutcome {
    /// The edit is now authoritative.
    Resolved,
    /// A newer edit owns the field; this ack changes nothing.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// The caller must re-fetch the owning entity and then call `finish_reconcile`.
    Reconcile,
    /// A newer edit owns the field; its own outcome decides what happens.
    Superseded,
}

/// State a mutator can read and write field-by-field.
pub trait OptimisticTarget<V> {
    fn read_field(&self, key: &EditKey) -> Option<V>;
    fn write_field(&mut self, key: &EditKey, value: V) -> bool;
}

#[derive(Debug)]
pub struct OptimisticMutator<V> {
    edits: HashMap<EditKey, OptimisticEdit<V>>,
    next_seq: u64,
}

impl<V> Default for OptimisticMutator<V> {
    fn default() -> Self {
        Self {
            edits: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<V: Clone + PartialEq + fmt::Debug> OptimisticMutator<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `proposed` into `target` immediately and records the edit.
    ///
    /// Returns `None` when the field does not exist. Re-applying over a pending
    /// edit keeps the original `previous`, so double submissions are harmless.
    pub fn apply<T>(&mut self, target: &mut T, key: EditKey, proposed: V) -> Option<EditTicket>
    where
        T: OptimisticTarget<V> + ?Sized,
    {
        let current = target.read_field(&key)?;
        let previous = match self.edits.get(&key) {
            Some(pending) => pending.previous.clone(),
            None => current,
        };
        if !target.write_field(&key, proposed.clone()) {
            return None;
        }

        self.next_seq += 1;
        let seq = self.next_seq;
        debug!("Optimistic edit {key} #{seq}: {previous:?} -> {proposed:?}");
        self.edits.insert(
            key.clone(),
            OptimisticEdit {
                key: key.clone(),
                previous,
                proposed,
                phase: EditPhase::OptimisticApplied,
                seq,
            },
        );
        Some(EditTicket { key, seq })
    }

    pub fn acknowledge(&mut self, ticket: &EditTicket) -> AckOutcome {
        match self.edits.get(&ticket.key) {
            Some(edit) if edit.seq == ticket.seq => {
                self.edits.remove(&ticket.key);
                AckOutcome::Resolved
            }
            _ => AckOutcome::Superseded,
        }
    }

    pub fn fail(&mut self, ticket: &EditTicket) -> FailureOutcome {
        match self.edits.get_mut(&ticket.key) {
            Some(edit) if edit.seq == ticket.seq => {
                edit.phase = EditPhase::Reverting;
                FailureOutcome::Reconcile
            }
            _ => FailureOutcome::Superseded,
        }
    }

    /// Closes a `Reverting` edit once the authoritative state has been loaded
    /// (or the reload was given up on).
    pub fn finish_reconcile(&mut self, key: &EditKey) {
        if matches!(self.phase(key), EditPhase::Reverting) {
            self.edits.remove(key);
        }
    }

    /// Re-applies still-pending edits for `entity_id` after its state was replaced.
    /// Returns how many fields were rewritten.
    pub fn reapply_pending<T>(&self, target: &mut T, entity_id: &str) -> usize
    where
        T: OptimisticTarget<V> + ?Sized,
    {
        self.edits
            .values()
            .filter(|e| e.key.entity_id == entity_id && e.phase == EditPhase::OptimisticApplied)
            .filter(|e| target.write_field(&e.key, e.proposed.clone()))
            .count()
    }

    pub fn phase(&self, key: &EditKey) -> EditPhase {
        self.edits
            .get(key)
            .map(|e| e.phase)
            .unwrap_or(EditPhase::Idle)
    }

    pub fn pending(&self, key: &EditKey) -> Option<&OptimisticEdit<V>> {
        self.edits.get(key)
    }

    pub fn has_pending(&self) -> bool {
        !self.edits.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.edits.len()
    }
}
