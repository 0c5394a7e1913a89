//! Plan Conflict Detector
//!
//! Rule-based evaluation of the current induction plan against the operator
//! constraint configuration and fleet safety data. The rule set is a fixed,
//! ordered table of declarative descriptors; evaluation order is the output
//! order, independent of severity. Each rule emits at most one conflict per
//! evaluation and the full list is re-derived from scratch on every call -
//! there is no incremental state and no merging across runs.
//!
//! Rules in evaluation order:
//! 1. Insufficient service fleet (resource, critical)
//! 2. Insufficient standby fleet (resource, high)
//! 3. Maintenance capacity exceeded (capacity, high)
//! 4. Cleaning capacity exceeded (capacity, medium)
//! 5. Critical trains in service (safety, critical)
//! 6. Expired certificates in service (compliance, critical)
//!
//! Rules are independent and non-exclusive: one trainset can appear in the
//! affected list of several conflicts in the same evaluation.

use std::collections::HashSet;

use tracing::debug;

use crate::config::InductionConfig;
use crate::types::{
    Conflict, ConflictKind, PlanAssignment, PlanStatus, RiskGrade, Severity, TrainsetId,
    TrainsetRecord,
};

// ============================================================================
// Rule Table
// ============================================================================

/// What a triggered rule reports back to the evaluator.
struct RuleFinding {
    description: String,
    affected: Vec<TrainsetId>,
}

/// One declarative conflict rule.
///
/// The fixed identity fields live in the table; only the trigger predicate
/// and the observed/limit interpolation live in `evaluate`.
struct ConflictRule {
    id: &'static str,
    kind: ConflictKind,
    severity: Severity,
    title: &'static str,
    suggestion: &'static str,
    evaluate: fn(&RuleContext<'_>) -> Option<RuleFinding>,
}

/// The fixed rule set, in evaluation (= output) order.
const RULES: [ConflictRule; 6] = [
    ConflictRule {
        id: "insufficient-service-fleet",
        kind: ConflictKind::ResourceConflict,
        severity: Severity::Critical,
        title: "Insufficient Service Fleet",
        suggestion: "Reassign healthy standby trainsets to service or lower the required service fleet.",
        evaluate: rule_insufficient_service,
    },
    ConflictRule {
        id: "insufficient-standby-fleet",
        kind: ConflictKind::ResourceConflict,
        severity: Severity::High,
        title: "Insufficient Standby Fleet",
        suggestion: "Hold additional fit trainsets on standby to restore the operational reserve.",
        evaluate: rule_insufficient_standby,
    },
    ConflictRule {
        id: "maintenance-capacity-exceeded",
        kind: ConflictKind::CapacityConflict,
        severity: Severity::High,
        title: "Maintenance Capacity Exceeded",
        suggestion: "Defer the lowest-priority work orders to the next maintenance window.",
        evaluate: rule_maintenance_capacity,
    },
    ConflictRule {
        id: "cleaning-capacity-exceeded",
        kind: ConflictKind::CapacityConflict,
        severity: Severity::Medium,
        title: "Cleaning Capacity Exceeded",
        suggestion: "Defer trainsets that are not yet overdue to the next cleaning window.",
        evaluate: rule_cleaning_capacity,
    },
    ConflictRule {
        id: "critical-trains-in-service",
        kind: ConflictKind::SafetyConflict,
        severity: Severity::Critical,
        title: "Critical Trains in Service",
        suggestion: "Move the affected trainsets to maintenance and backfill from standby.",
        evaluate: rule_critical_in_service,
    },
    ConflictRule {
        id: "expired-certificates-in-service",
        kind: ConflictKind::ComplianceConflict,
        severity: Severity::Critical,
        title: "Expired Certificates in Service",
        suggestion: "Withdraw the affected trainsets from service until their certificates are renewed.",
        evaluate: rule_expired_certs_in_service,
    },
];

// ============================================================================
// Evaluation Context
// ============================================================================

/// Pre-computed plan census shared by all rules in one evaluation.
struct RuleContext<'a> {
    /// Trainset ids per assigned category, in plan order (duplicates kept -
    /// the census mirrors whatever the plan collaborator delivered)
    service: Vec<TrainsetId>,
    standby: Vec<TrainsetId>,
    maintenance: Vec<TrainsetId>,
    cleaning: Vec<TrainsetId>,
    /// Membership set for the service category
    in_service: HashSet<&'a str>,
    config: &'a InductionConfig,
    master: &'a [TrainsetRecord],
}

impl<'a> RuleContext<'a> {
    fn new(
        plan: &'a [PlanAssignment],
        config: &'a InductionConfig,
        master: &'a [TrainsetRecord],
    ) -> Self {
        let mut service = Vec::new();
        let mut standby = Vec::new();
        let mut maintenance = Vec::new();
        let mut cleaning = Vec::new();
        let mut in_service = HashSet::new();

        for assignment in plan {
            match assignment.assigned_status {
                PlanStatus::Service => {
                    service.push(assignment.id.clone());
                    in_service.insert(assignment.id.as_str());
                }
                PlanStatus::Standby => standby.push(assignment.id.clone()),
                PlanStatus::Maintenance => maintenance.push(assignment.id.clone()),
                PlanStatus::Cleaning => cleaning.push(assignment.id.clone()),
            }
        }

        Self {
            service,
            standby,
            maintenance,
            cleaning,
            in_service,
            config,
            master,
        }
    }

    /// Master records assigned to service that satisfy `predicate`, in
    /// master-table order.
    fn service_trainsets_where(
        &self,
        predicate: impl Fn(&TrainsetRecord) -> bool,
    ) -> Vec<TrainsetId> {
        self.master
            .iter()
            .filter(|record| self.in_service.contains(record.id.as_str()) && predicate(record))
            .map(|record| record.id.clone())
            .collect()
    }
}

// ============================================================================
// Rule Predicates
// ============================================================================

fn rule_insufficient_service(ctx: &RuleContext<'_>) -> Option<RuleFinding> {
    let assigned = ctx.service.len() as i64;
    if assigned >= ctx.config.required_service_fleet {
        return None;
    }
    Some(RuleFinding {
        description: format!(
            "Plan assigns {assigned} trainsets to service but {} are required.",
            ctx.config.required_service_fleet
        ),
        affected: ctx.service.clone(),
    })
}

fn rule_insufficient_standby(ctx: &RuleContext<'_>) -> Option<RuleFinding> {
    let assigned = ctx.standby.len() as i64;
    if assigned >= ctx.config.min_standby_fleet {
        return None;
    }
    Some(RuleFinding {
        description: format!(
            "Plan holds {assigned} trainsets on standby but at least {} are required.",
            ctx.config.min_standby_fleet
        ),
        affected: ctx.standby.clone(),
    })
}

fn rule_maintenance_capacity(ctx: &RuleContext<'_>) -> Option<RuleFinding> {
    let assigned = ctx.maintenance.len() as i64;
    if assigned <= ctx.config.max_maintenance_trains {
        return None;
    }
    Some(RuleFinding {
        description: format!(
            "Plan sends {assigned} trainsets to maintenance but only {} bays are available.",
            ctx.config.max_maintenance_trains
        ),
        affected: ctx.maintenance.clone(),
    })
}

fn rule_cleaning_capacity(ctx: &RuleContext<'_>) -> Option<RuleFinding> {
    let assigned = ctx.cleaning.len() as i64;
    if assigned <= ctx.config.max_cleaning_trains {
        return None;
    }
    Some(RuleFinding {
        description: format!(
            "Plan schedules {assigned} trainsets for cleaning but only {} slots are available.",
            ctx.config.max_cleaning_trains
        ),
        affected: ctx.cleaning.clone(),
    })
}

fn rule_critical_in_service(ctx: &RuleContext<'_>) -> Option<RuleFinding> {
    let affected =
        ctx.service_trainsets_where(|record| record.urgency_level == RiskGrade::Critical);
    if affected.is_empty() {
        return None;
    }
    Some(RuleFinding {
        description: format!(
            "{} trainset(s) at Critical maintenance urgency are assigned to revenue service.",
            affected.len()
        ),
        affected,
    })
}

fn rule_expired_certs_in_service(ctx: &RuleContext<'_>) -> Option<RuleFinding> {
    let affected = ctx.service_trainsets_where(TrainsetRecord::has_expired_certificate);
    if affected.is_empty() {
        return None;
    }
    Some(RuleFinding {
        description: format!(
            "{} trainset(s) with expired fitness certificates are assigned to revenue service.",
            affected.len()
        ),
        affected,
    })
}

// ============================================================================
// Detector
// ============================================================================

/// Evaluate the fixed rule set against the current plan.
///
/// Deterministic and stateless: identical inputs yield an identical conflict
/// sequence. A missing plan is an empty slice - the category counts read as
/// zero, which legitimately trips the resource rules.
pub fn detect_conflicts(
    plan: &[PlanAssignment],
    config: &InductionConfig,
    master: &[TrainsetRecord],
) -> Vec<Conflict> {
    let ctx = RuleContext::new(plan, config, master);

    let conflicts: Vec<Conflict> = RULES
        .iter()
        .filter_map(|rule| {
            (rule.evaluate)(&ctx).map(|finding| {
                debug!(
                    rule = rule.id,
                    severity = %rule.severity,
                    affected = finding.affected.len(),
                    "Conflict rule triggered"
                );
                Conflict {
                    id: rule.id.to_string(),
                    kind: rule.kind,
                    severity: rule.severity,
                    title: rule.title.to_string(),
                    description: finding.description,
                    suggestion: rule.suggestion.to_string(),
                    affected_trainsets: finding.affected,
                }
            })
        })
        .collect();

    debug!(
        plan_rows = plan.len(),
        conflicts = conflicts.len(),
        "Conflict evaluation complete"
    );

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CertStatus;
    use serde_json::json;

    fn assignment(id: &str, status: PlanStatus) -> PlanAssignment {
        PlanAssignment {
            id: id.to_string(),
            assigned_status: status,
            justification: String::new(),
        }
    }

    fn plan_with_counts(
        service: usize,
        standby: usize,
        maintenance: usize,
        cleaning: usize,
    ) -> Vec<PlanAssignment> {
        let mut plan = Vec::new();
        let mut n = 0;
        let mut push = |count: usize, status: PlanStatus, plan: &mut Vec<PlanAssignment>| {
            for _ in 0..count {
                n += 1;
                plan.push(assignment(&format!("TS-{n:02}"), status));
            }
        };
        push(service, PlanStatus::Service, &mut plan);
        push(standby, PlanStatus::Standby, &mut plan);
        push(maintenance, PlanStatus::Maintenance, &mut plan);
        push(cleaning, PlanStatus::Cleaning, &mut plan);
        plan
    }

    fn master_record(id: &str, urgency: RiskGrade, expired_cert: bool) -> TrainsetRecord {
        let mut record: TrainsetRecord =
            serde_json::from_value(json!({"TrainSet_ID": id})).unwrap();
        record.urgency_level = urgency;
        record.rolling_stock_status = Some(if expired_cert {
            CertStatus::Expired
        } else {
            CertStatus::Valid
        });
        record.signalling_status = Some(CertStatus::Valid);
        record.telecom_status = Some(CertStatus::Valid);
        record
    }

    #[test]
    fn test_satisfied_plan_yields_no_conflicts() {
        let plan = plan_with_counts(8, 3, 4, 7);
        let conflicts = detect_conflicts(&plan, &InductionConfig::default(), &[]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_resource_shortfalls_in_rule_order() {
        // 6 service vs 8 required and 2 standby vs 3 required: exactly the
        // two resource conflicts, service first.
        let plan = plan_with_counts(6, 2, 3, 2);
        let conflicts = detect_conflicts(&plan, &InductionConfig::default(), &[]);

        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].id, "insufficient-service-fleet");
        assert_eq!(conflicts[0].severity, Severity::Critical);
        assert_eq!(conflicts[0].affected_trainsets.len(), 6);
        assert!(conflicts[0].description.contains('6'));
        assert!(conflicts[0].description.contains('8'));
        assert_eq!(conflicts[1].id, "insufficient-standby-fleet");
        assert_eq!(conflicts[1].severity, Severity::High);
    }

    #[test]
    fn test_maintenance_capacity_exceeded() {
        let plan = plan_with_counts(8, 3, 5, 0);
        let conflicts = detect_conflicts(&plan, &InductionConfig::default(), &[]);

        assert_eq!(conflicts.len(), 1);
        let conflict = &conflicts[0];
        assert_eq!(conflict.id, "maintenance-capacity-exceeded");
        assert_eq!(conflict.kind, ConflictKind::CapacityConflict);
        assert_eq!(conflict.severity, Severity::High);
        assert_eq!(conflict.affected_trainsets.len(), 5);
    }

    #[test]
    fn test_capacity_boundary_is_strictly_greater() {
        // Exactly at capacity is fine.
        let plan = plan_with_counts(8, 3, 4, 7);
        assert!(detect_conflicts(&plan, &InductionConfig::default(), &[]).is_empty());

        let plan = plan_with_counts(8, 3, 4, 8);
        let conflicts = detect_conflicts(&plan, &InductionConfig::default(), &[]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].id, "cleaning-capacity-exceeded");
        assert_eq!(conflicts[0].severity, Severity::Medium);
    }

    #[test]
    fn test_missing_plan_trips_resource_rules() {
        let conflicts = detect_conflicts(&[], &InductionConfig::default(), &[]);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].id, "insufficient-service-fleet");
        assert!(conflicts[0].affected_trainsets.is_empty());
        assert!(conflicts[0].description.starts_with("Plan assigns 0"));
        assert_eq!(conflicts[1].id, "insufficient-standby-fleet");
    }

    #[test]
    fn test_critical_trainset_in_service_is_flagged() {
        let mut plan = plan_with_counts(7, 3, 4, 7);
        plan.push(assignment("TS-90", PlanStatus::Service));
        let master = vec![
            master_record("TS-90", RiskGrade::Critical, false),
            master_record("TS-01", RiskGrade::Low, false),
        ];

        let conflicts = detect_conflicts(&plan, &InductionConfig::default(), &master);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].id, "critical-trains-in-service");
        assert_eq!(conflicts[0].kind, ConflictKind::SafetyConflict);
        assert_eq!(conflicts[0].affected_trainsets, vec!["TS-90".to_string()]);
    }

    #[test]
    fn test_critical_trainset_off_service_is_not_flagged() {
        let mut plan = plan_with_counts(8, 2, 4, 7);
        plan.push(assignment("TS-90", PlanStatus::Standby));
        let master = vec![master_record("TS-90", RiskGrade::Critical, false)];

        let conflicts = detect_conflicts(&plan, &InductionConfig::default(), &master);
        assert!(!conflicts.iter().any(|c| c.id == "critical-trains-in-service"));
    }

    #[test]
    fn test_rules_five_and_six_are_independent() {
        // One trainset both Critical and cert-expired, in service: it must
        // appear in BOTH affected lists.
        let mut plan = plan_with_counts(7, 3, 4, 7);
        plan.push(assignment("TS-90", PlanStatus::Service));
        let master = vec![master_record("TS-90", RiskGrade::Critical, true)];

        let conflicts = detect_conflicts(&plan, &InductionConfig::default(), &master);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].id, "critical-trains-in-service");
        assert_eq!(conflicts[1].id, "expired-certificates-in-service");
        assert_eq!(conflicts[0].affected_trainsets, vec!["TS-90".to_string()]);
        assert_eq!(conflicts[1].affected_trainsets, vec!["TS-90".to_string()]);
    }

    #[test]
    fn test_unknown_certificate_status_is_not_expired() {
        let mut plan = plan_with_counts(7, 3, 4, 7);
        plan.push(assignment("TS-90", PlanStatus::Service));
        let mut record = master_record("TS-90", RiskGrade::Low, false);
        record.rolling_stock_status = None;
        record.signalling_status = None;
        record.telecom_status = None;

        let conflicts = detect_conflicts(&plan, &InductionConfig::default(), &[record]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_duplicate_plan_rows_do_not_crash() {
        let mut plan = plan_with_counts(8, 3, 0, 0);
        // The same trainset assigned twice - counts follow the rows as given.
        plan.push(assignment("TS-01", PlanStatus::Maintenance));
        plan.push(assignment("TS-01", PlanStatus::Maintenance));

        let conflicts = detect_conflicts(&plan, &InductionConfig::default(), &[]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_negative_config_is_tolerated() {
        let config = InductionConfig {
            required_service_fleet: -5,
            min_standby_fleet: -1,
            ..InductionConfig::default()
        };
        // Negative requirements can never be violated.
        let conflicts = detect_conflicts(&[], &config, &[]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_detection_is_idempotent() {
        let plan = plan_with_counts(5, 1, 6, 9);
        let master = vec![master_record("TS-01", RiskGrade::Critical, true)];
        let config = InductionConfig::default();

        let first = detect_conflicts(&plan, &config, &master);
        let second = detect_conflicts(&plan, &config, &master);
        assert_eq!(first, second);
    }
}
