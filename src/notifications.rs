//! Notification Ledger
//!
//! Append-only, capacity-bounded log of operator-facing events: conflicts
//! surfaced by the detector, export actions, plan lifecycle messages. Kept
//! most-recent-first and truncated to the newest 50 entries; a single-session
//! transient log with no removal API beyond the size cap.
//!
//! The ledger is persistent-style: [`NotificationLedger::record`] returns a
//! new ledger and never mutates the caller's copy, so the host can hold the
//! previous state while rendering the next one.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Notification, NotificationDraft};

/// Maximum entries retained; the oldest are dropped on overflow.
pub const LEDGER_CAPACITY: usize = 50;

/// Bounded, time-ordered notification history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NotificationLedger {
    entries: Vec<Notification>,
}

impl NotificationLedger {
    /// Empty ledger for a fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one notification, returning the new ledger state.
    ///
    /// Assigns the creation timestamp and an epoch-millisecond id, bumped
    /// past the previous head on collision so ids stay strictly monotonic
    /// within a ledger even for appends inside the same millisecond.
    #[must_use]
    pub fn record(&self, draft: NotificationDraft) -> Self {
        let created_at = Utc::now();
        let id = match self.entries.first() {
            Some(head) => created_at.timestamp_millis().max(head.id + 1),
            None => created_at.timestamp_millis(),
        };

        debug!(
            id,
            kind = %draft.kind,
            severity = %draft.severity,
            title = %draft.title,
            "Recording notification"
        );

        let mut entries = Vec::with_capacity((self.entries.len() + 1).min(LEDGER_CAPACITY));
        entries.push(Notification {
            id,
            created_at,
            kind: draft.kind,
            severity: draft.severity,
            title: draft.title,
            message: draft.message,
        });
        entries.extend(
            self.entries
                .iter()
                .take(LEDGER_CAPACITY - 1)
                .cloned(),
        );

        Self { entries }
    }

    /// Append a batch in order; the last draft ends up at the head.
    #[must_use]
    pub fn record_all(&self, drafts: impl IntoIterator<Item = NotificationDraft>) -> Self {
        drafts
            .into_iter()
            .fold(self.clone(), |ledger, draft| ledger.record(draft))
    }

    /// All entries, most recent first.
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// The most recently appended entry, if any.
    pub fn latest(&self) -> Option<&Notification> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
