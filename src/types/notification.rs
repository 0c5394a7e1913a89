//! Notification types for the bounded session ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::Severity;

// ============================================================================
// Notifications
// ============================================================================

/// Source category of a ledger notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Emitted by the conflict detector
    Conflict,
    /// Emitted when a report export is triggered
    Export,
    /// Plan lifecycle events (applied / replaced)
    Plan,
    /// Anything else the host surfaces to the operator
    System,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Conflict => write!(f, "Conflict"),
            NotificationKind::Export => write!(f, "Export"),
            NotificationKind::Plan => write!(f, "Plan"),
            NotificationKind::System => write!(f, "System"),
        }
    }
}

/// One immutable entry in the notification ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    /// Monotonically increasing identifier, epoch-millisecond based
    pub id: i64,
    /// Wall-clock creation time, assigned at append
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

/// Notification content before the ledger assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub kind: NotificationKind,
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl NotificationDraft {
    pub fn new(
        kind: NotificationKind,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            title: title.into(),
            message: message.into(),
        }
    }
}
