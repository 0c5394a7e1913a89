//! Rail Induct: Fleet Induction Operations Intelligence
//!
//! Plan analytics and conflict detection engine for metro trainset induction
//! planning. An external optimizer assigns each trainset to SERVICE, STANDBY,
//! MAINTENANCE, or CLEANING for the next operating cycle; this crate derives
//! everything the operations dashboard shows about that plan.
//!
//! ## Architecture
//!
//! - **Dataset Store**: last-fetched fleet master data plus six auxiliary
//!   compliance tables, replaced wholesale on refresh
//! - **Filter/Search Engine**: stateless table filtering for display
//! - **Analytics Engine**: fleet health, compliance, risk, and efficiency
//!   metric groups
//! - **Conflict Detector**: fixed ordered rule set comparing the plan
//!   against constraints and fleet safety data
//! - **Notification Ledger**: bounded most-recent-first session event log
//! - **Induction Board**: host-side owner of the current snapshot, wiring
//!   the pure engines together

pub mod config;
pub mod types;
pub mod store;
pub mod filter;
pub mod analytics;
pub mod conflicts;
pub mod notifications;
pub mod board;

// Re-export configuration
pub use config::{ConfigError, InductionConfig, ObjectiveWeights};

// Re-export commonly used types
pub use types::{
    CertStatus, CertificateType, CleaningStatus, Conflict, ConflictKind, Notification,
    NotificationDraft, NotificationKind, PlanAssignment, PlanStatus, RiskGrade, Severity,
    TrainsetId, TrainsetRecord, WorkStatus,
};

// Re-export engines and snapshots
pub use analytics::{compute_analytics, AnalyticsSnapshot};
pub use board::{InductionBoard, PlanReport};
pub use conflicts::detect_conflicts;
pub use notifications::{NotificationLedger, LEDGER_CAPACITY};
pub use store::FleetDataset;
