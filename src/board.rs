//! Induction Board
//!
//! The host-side owner of the current operating snapshot: fleet dataset,
//! induction plan, constraint configuration, and the session notification
//! ledger. All derivation is delegated to the pure engines - the board only
//! sequences wholesale replacements and recomputation:
//!
//! - dataset / plan / config are replaced, never patched in place
//! - analytics and conflicts are re-derived after every change
//! - plan and config changes surface each detected conflict on the ledger
//! - export actions are logged on the ledger
//!
//! The board is single-writer by design; the surrounding application is
//! event-driven and hands out read-only views between changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analytics::{compute_analytics, AnalyticsSnapshot};
use crate::config::InductionConfig;
use crate::conflicts::detect_conflicts;
use crate::notifications::NotificationLedger;
use crate::store::FleetDataset;
use crate::types::{
    Conflict, Notification, NotificationDraft, NotificationKind, PlanAssignment, Severity,
};

// ============================================================================
// Plan Report
// ============================================================================

/// Serializable exposure surface for the rendering/export collaborators.
///
/// Plain structured data with no hidden behavior - suitable for direct
/// JSON/CSV encoding by the consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    pub generated_at: DateTime<Utc>,
    pub fleet_size: usize,
    pub plan: Vec<PlanAssignment>,
    pub analytics: AnalyticsSnapshot,
    pub conflicts: Vec<Conflict>,
    /// Ledger contents, most recent first
    pub notifications: Vec<Notification>,
}

// ============================================================================
// Induction Board
// ============================================================================

/// Current operating snapshot plus derived state.
#[derive(Debug, Clone)]
pub struct InductionBoard {
    dataset: FleetDataset,
    plan: Vec<PlanAssignment>,
    config: InductionConfig,
    analytics: AnalyticsSnapshot,
    conflicts: Vec<Conflict>,
    ledger: NotificationLedger,
}

impl Default for InductionBoard {
    fn default() -> Self {
        Self::new(InductionConfig::default())
    }
}

impl InductionBoard {
    /// Board with an empty dataset, no plan, and the given constraints.
    pub fn new(config: InductionConfig) -> Self {
        for warning in config.validate() {
            warn!(warning = %warning, "Constraint configuration out of range");
        }
        let mut board = Self {
            dataset: FleetDataset::new(),
            plan: Vec::new(),
            config,
            analytics: AnalyticsSnapshot::default(),
            conflicts: Vec::new(),
            ledger: NotificationLedger::new(),
        };
        board.refresh(false);
        board
    }

    /// Replace the fleet dataset wholesale and re-derive everything.
    ///
    /// Conflict notifications are not re-emitted here: a data refresh is a
    /// background event, not an operator action on the plan.
    pub fn load_dataset(&mut self, dataset: FleetDataset) {
        info!(
            fleet_size = dataset.fleet_size(),
            branding = dataset.branding.len(),
            cleaning = dataset.cleaning.len(),
            fitness = dataset.fitness.len(),
            jobcards = dataset.jobcards.len(),
            mileage = dataset.mileage.len(),
            stabling = dataset.stabling.len(),
            "Fleet dataset loaded"
        );
        self.dataset = dataset;
        self.refresh(false);
    }

    /// Replace the induction plan wholesale, re-derive, and surface every
    /// detected conflict on the ledger.
    pub fn apply_plan(&mut self, plan: Vec<PlanAssignment>) {
        self.plan = plan;
        self.refresh(true);
        self.ledger = self.ledger.record(NotificationDraft::new(
            NotificationKind::Plan,
            Severity::Low,
            "Induction plan applied",
            format!(
                "{} assignments evaluated, {} conflict(s) detected",
                self.plan.len(),
                self.conflicts.len()
            ),
        ));
        info!(
            assignments = self.plan.len(),
            conflicts = self.conflicts.len(),
            "Induction plan applied"
        );
    }

    /// Replace the constraint configuration, re-derive, and surface every
    /// detected conflict on the ledger.
    pub fn update_config(&mut self, config: InductionConfig) {
        for warning in config.validate() {
            warn!(warning = %warning, "Constraint configuration out of range");
        }
        self.config = config;
        self.refresh(true);
        info!(conflicts = self.conflicts.len(), "Constraint configuration updated");
    }

    /// Log an export action on the ledger, e.g. `record_export("CSV")`.
    pub fn record_export(&mut self, format: &str) {
        self.ledger = self.ledger.record(NotificationDraft::new(
            NotificationKind::Export,
            Severity::Low,
            "Report exported",
            format!("Induction report exported as {format}"),
        ));
        info!(format = %format, "Report export recorded");
    }

    /// Re-derive analytics and conflicts from the current snapshot.
    fn refresh(&mut self, notify_conflicts: bool) {
        self.analytics = compute_analytics(&self.dataset);
        self.conflicts = detect_conflicts(&self.plan, &self.config, &self.dataset.master);

        if notify_conflicts {
            self.ledger = self.ledger.record_all(self.conflicts.iter().map(|conflict| {
                NotificationDraft::new(
                    NotificationKind::Conflict,
                    conflict.severity,
                    conflict.title.clone(),
                    conflict.description.clone(),
                )
            }));
        }
    }

    // ========================================================================
    // Read-only views
    // ========================================================================

    pub fn dataset(&self) -> &FleetDataset {
        &self.dataset
    }

    pub fn plan(&self) -> &[PlanAssignment] {
        &self.plan
    }

    pub fn config(&self) -> &InductionConfig {
        &self.config
    }

    pub fn analytics(&self) -> &AnalyticsSnapshot {
        &self.analytics
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn notifications(&self) -> &[Notification] {
        self.ledger.entries()
    }

    /// Assemble the full report for the rendering/export collaborators.
    pub fn report(&self) -> PlanReport {
        PlanReport {
            generated_at: Utc::now(),
            fleet_size: self.dataset.fleet_size(),
            plan: self.plan.clone(),
            analytics: self.analytics,
            conflicts: self.conflicts.clone(),
            notifications: self.ledger.entries().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlanStatus, RiskGrade, TrainsetRecord};
    use serde_json::json;

    fn assignment(id: &str, status: PlanStatus) -> PlanAssignment {
        PlanAssignment {
            id: id.to_string(),
            assigned_status: status,
            justification: String::new(),
        }
    }

    fn critical_record(id: &str) -> TrainsetRecord {
        let mut record: TrainsetRecord =
            serde_json::from_value(json!({"TrainSet_ID": id})).unwrap();
        record.urgency_level = RiskGrade::Critical;
        record
    }

    #[test]
    fn test_new_board_has_empty_derivations() {
        let board = InductionBoard::new(InductionConfig::default());
        assert_eq!(board.analytics().fleet_health.health_percentage, 0);
        // No plan applied yet: conflicts exist but nothing was notified.
        assert!(!board.conflicts().is_empty());
        assert!(board.notifications().is_empty());
    }

    #[test]
    fn test_apply_plan_surfaces_conflicts_on_ledger() {
        let mut board = InductionBoard::new(InductionConfig::default());
        // 1 SERVICE / 0 STANDBY against 8/3 requirements: two conflicts.
        board.apply_plan(vec![assignment("TS-01", PlanStatus::Service)]);

        assert_eq!(board.conflicts().len(), 2);
        // Two conflict notifications plus the plan-applied entry.
        assert_eq!(board.notifications().len(), 3);
        assert_eq!(board.notifications()[0].title, "Induction plan applied");
        assert!(board.notifications()[1].title.contains("Standby"));
        assert!(board.notifications()[2].title.contains("Service"));
    }

    #[test]
    fn test_update_config_reevaluates_conflicts() {
        let mut board = InductionBoard::new(InductionConfig::default());
        let plan: Vec<PlanAssignment> = (0..8)
            .map(|i| assignment(&format!("TS-{i:02}"), PlanStatus::Service))
            .chain((8..11).map(|i| assignment(&format!("TS-{i:02}"), PlanStatus::Standby)))
            .collect();
        board.apply_plan(plan);
        assert!(board.conflicts().is_empty());

        board.update_config(InductionConfig {
            required_service_fleet: 10,
            ..InductionConfig::default()
        });
        assert_eq!(board.conflicts().len(), 1);
        assert_eq!(board.conflicts()[0].id, "insufficient-service-fleet");
        assert_eq!(board.notifications()[0].title, "Insufficient Service Fleet");
    }

    #[test]
    fn test_dataset_load_refreshes_without_notifying() {
        let mut board = InductionBoard::new(InductionConfig::default());
        let mut dataset = FleetDataset::new();
        dataset.replace_master(vec![critical_record("TS-01")]);
        board.load_dataset(dataset);

        assert_eq!(board.analytics().fleet_health.critical_issues, 1);
        assert!(board.notifications().is_empty());
    }

    #[test]
    fn test_export_is_logged() {
        let mut board = InductionBoard::new(InductionConfig::default());
        board.record_export("CSV");

        let head = board.notifications().first().cloned();
        let head = head.as_ref();
        assert_eq!(head.map(|n| n.kind), Some(NotificationKind::Export));
        assert!(head.is_some_and(|n| n.message.contains("CSV")));
    }

    #[test]
    fn test_report_carries_all_views() {
        let mut board = InductionBoard::new(InductionConfig::default());
        board.apply_plan(vec![assignment("TS-01", PlanStatus::Service)]);
        let report = board.report();

        assert_eq!(report.plan.len(), 1);
        assert_eq!(report.conflicts.len(), 2);
        assert_eq!(report.notifications.len(), board.notifications().len());

        // Must serialize cleanly for the export collaborator.
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["analytics"]["fleet_health"].is_object());
        assert_eq!(value["conflicts"][0]["type"], "resource_conflict");
    }
}
