//! Fleet Analytics Engine
//!
//! Deterministic, rule-based aggregate metrics over the fleet dataset. Four
//! metric groups are derived per evaluation:
//!
//! - **Fleet health**: certificate-backed service readiness and urgency tallies
//! - **Compliance**: deep-clean and branding-contract compliance percentages
//! - **Risk**: combined urgency/penalty exposure collapsed into a 0-100 score
//! - **Efficiency**: depot positioning quality from shunting-time geometry
//!
//! Every computation is total: an empty master table produces the zeroed
//! snapshot and a zero denominator always yields 0, never NaN or infinity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::FleetDataset;
use crate::types::{CleaningStatus, RiskGrade};

// ============================================================================
// Snapshot Types
// ============================================================================

/// Certificate-backed readiness and urgency tallies.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FleetHealth {
    /// Trainsets with all three fitness certificates Valid
    pub service_ready: usize,
    /// `service_ready / fleet size`, rounded percentage
    pub health_percentage: u8,
    /// Trainsets at Critical mileage urgency
    pub critical_issues: usize,
    /// Trainsets at High mileage urgency
    pub maintenance_due: usize,
}

/// Cleaning-cycle and branding-contract compliance percentages.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceSummary {
    /// Share of cleaning roster rows not Overdue, rounded percentage
    pub cleaning_compliance: u8,
    /// Share of branding rows not at High/Critical penalty risk
    pub contract_compliance: u8,
}

/// Combined urgency and penalty exposure.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskSummary {
    /// Urgency Critical or penalty risk Critical (non-exclusive tallies)
    pub critical_risks: usize,
    /// Urgency High or penalty risk High
    pub high_risks: usize,
    /// `min(100, critical x 10 + high x 5)`
    pub risk_score: u8,
}

/// Depot positioning quality.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct EfficiencySummary {
    /// Mean estimated shunting time (minutes, 1 decimal)
    pub avg_shunting_time: f64,
    /// Trainsets requiring zero shunting
    pub optimal_positioned: usize,
    /// `optimal_positioned / fleet size`, rounded percentage
    pub positioning_efficiency: u8,
}

/// Full analytics snapshot for one dataset state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsSnapshot {
    pub fleet_health: FleetHealth,
    pub compliance: ComplianceSummary,
    pub risk: RiskSummary,
    pub efficiency: EfficiencySummary,
}

// ============================================================================
// Computation
// ============================================================================

/// Compute the four metric groups from the current dataset.
///
/// Never fails: an empty master table short-circuits to the zeroed snapshot
/// so a dashboard rendered before the first fetch shows zeros, not errors.
pub fn compute_analytics(dataset: &FleetDataset) -> AnalyticsSnapshot {
    if dataset.is_empty() {
        debug!("Master data empty, returning zeroed analytics snapshot");
        return AnalyticsSnapshot::default();
    }

    let snapshot = AnalyticsSnapshot {
        fleet_health: fleet_health(dataset),
        compliance: compliance(dataset),
        risk: risk(dataset),
        efficiency: efficiency(dataset),
    };

    debug!(
        fleet_size = dataset.fleet_size(),
        health_pct = snapshot.fleet_health.health_percentage,
        risk_score = snapshot.risk.risk_score,
        "Computed analytics snapshot"
    );

    snapshot
}

fn fleet_health(dataset: &FleetDataset) -> FleetHealth {
    let total = dataset.fleet_size();
    let service_ready = dataset
        .master
        .iter()
        .filter(|record| record.is_service_ready())
        .count();

    FleetHealth {
        service_ready,
        health_percentage: ratio_pct(service_ready, total),
        critical_issues: count_urgency(dataset, RiskGrade::Critical),
        maintenance_due: count_urgency(dataset, RiskGrade::High),
    }
}

fn compliance(dataset: &FleetDataset) -> ComplianceSummary {
    let cleaning_rows = dataset.cleaning.len();
    let overdue = dataset
        .cleaning
        .iter()
        .filter(|row| row.compliance_status == Some(CleaningStatus::Overdue))
        .count();

    let contract_rows = dataset.branding.len();
    let at_risk = dataset
        .branding
        .iter()
        .filter(|row| {
            matches!(
                row.penalty_risk_level,
                Some(RiskGrade::High | RiskGrade::Critical)
            )
        })
        .count();

    ComplianceSummary {
        cleaning_compliance: ratio_pct(cleaning_rows - overdue, cleaning_rows),
        contract_compliance: ratio_pct(contract_rows - at_risk, contract_rows),
    }
}

fn risk(dataset: &FleetDataset) -> RiskSummary {
    // The two tallies are deliberately non-exclusive: a trainset at High
    // urgency with a Critical penalty risk contributes to both.
    let critical_risks = dataset
        .master
        .iter()
        .filter(|record| {
            record.urgency_level == RiskGrade::Critical
                || record.penalty_risk_level == Some(RiskGrade::Critical)
        })
        .count();

    let high_risks = dataset
        .master
        .iter()
        .filter(|record| {
            record.urgency_level == RiskGrade::High
                || record.penalty_risk_level == Some(RiskGrade::High)
        })
        .count();

    let raw_score = critical_risks * 10 + high_risks * 5;

    RiskSummary {
        critical_risks,
        high_risks,
        risk_score: raw_score.min(100) as u8,
    }
}

fn efficiency(dataset: &FleetDataset) -> EfficiencySummary {
    let total = dataset.fleet_size();
    let minutes_sum: f64 = dataset
        .master
        .iter()
        .map(|record| record.estimated_shunting_time_minutes)
        .sum();
    let optimal_positioned = dataset
        .master
        .iter()
        .filter(|record| record.estimated_shunting_time_minutes == 0.0)
        .count();

    let avg = if total == 0 {
        0.0
    } else {
        minutes_sum / total as f64
    };

    EfficiencySummary {
        // One decimal, matching the dashboard tile
        avg_shunting_time: (avg * 10.0).round() / 10.0,
        optimal_positioned,
        positioning_efficiency: ratio_pct(optimal_positioned, total),
    }
}

fn count_urgency(dataset: &FleetDataset, grade: RiskGrade) -> usize {
    dataset
        .master
        .iter()
        .filter(|record| record.urgency_level == grade)
        .count()
}

/// Rounded percentage with the zero-denominator guard applied.
fn ratio_pct(numerator: usize, denominator: usize) -> u8 {
    if denominator == 0 {
        return 0;
    }
    ((numerator as f64 / denominator as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CertStatus, CleaningRecord, BrandingRecord, TrainsetRecord};
    use serde_json::json;

    fn record(
        id: &str,
        urgency: RiskGrade,
        penalty: Option<RiskGrade>,
        certs: [CertStatus; 3],
        shunting: f64,
    ) -> TrainsetRecord {
        let mut record: TrainsetRecord =
            serde_json::from_value(json!({"TrainSet_ID": id})).unwrap();
        record.urgency_level = urgency;
        record.penalty_risk_level = penalty;
        record.rolling_stock_status = Some(certs[0]);
        record.signalling_status = Some(certs[1]);
        record.telecom_status = Some(certs[2]);
        record.estimated_shunting_time_minutes = shunting;
        record
    }

    fn all_valid() -> [CertStatus; 3] {
        [CertStatus::Valid, CertStatus::Valid, CertStatus::Valid]
    }

    fn cleaning_row(id: &str, status: CleaningStatus) -> CleaningRecord {
        let mut row: CleaningRecord = serde_json::from_value(json!({"TrainSet_ID": id})).unwrap();
        row.compliance_status = Some(status);
        row
    }

    fn branding_row(id: &str, risk: Option<RiskGrade>) -> BrandingRecord {
        let mut row: BrandingRecord = serde_json::from_value(json!({"TrainSet_ID": id})).unwrap();
        row.penalty_risk_level = risk;
        row
    }

    #[test]
    fn test_empty_master_returns_zeroed_snapshot() {
        let snapshot = compute_analytics(&FleetDataset::new());
        assert_eq!(snapshot, AnalyticsSnapshot::default());
        assert_eq!(snapshot.fleet_health.health_percentage, 0);
        assert_eq!(snapshot.risk.risk_score, 0);
    }

    #[test]
    fn test_health_percentage_is_exact_rounding() {
        let mut dataset = FleetDataset::new();
        dataset.replace_master(vec![
            record("TS-01", RiskGrade::Low, None, all_valid(), 0.0),
            record(
                "TS-02",
                RiskGrade::Low,
                None,
                [CertStatus::Valid, CertStatus::Expired, CertStatus::Valid],
                0.0,
            ),
            record("TS-03", RiskGrade::Low, None, all_valid(), 0.0),
        ]);

        let health = compute_analytics(&dataset).fleet_health;
        assert_eq!(health.service_ready, 2);
        // round(2/3 * 100) = 67
        assert_eq!(health.health_percentage, 67);
        assert!(health.health_percentage <= 100);
    }

    #[test]
    fn test_expiring_certificate_is_not_service_ready() {
        let mut dataset = FleetDataset::new();
        dataset.replace_master(vec![record(
            "TS-01",
            RiskGrade::Low,
            None,
            [CertStatus::Valid, CertStatus::Expiring, CertStatus::Valid],
            0.0,
        )]);

        let health = compute_analytics(&dataset).fleet_health;
        assert_eq!(health.service_ready, 0);
        assert_eq!(health.health_percentage, 0);
    }

    #[test]
    fn test_urgency_tallies() {
        let mut dataset = FleetDataset::new();
        dataset.replace_master(vec![
            record("TS-01", RiskGrade::Critical, None, all_valid(), 0.0),
            record("TS-02", RiskGrade::High, None, all_valid(), 0.0),
            record("TS-03", RiskGrade::High, None, all_valid(), 0.0),
            record("TS-04", RiskGrade::Medium, None, all_valid(), 0.0),
        ]);

        let health = compute_analytics(&dataset).fleet_health;
        assert_eq!(health.critical_issues, 1);
        assert_eq!(health.maintenance_due, 2);
    }

    #[test]
    fn test_cleaning_compliance_from_roster() {
        let mut dataset = FleetDataset::new();
        dataset.replace_master(vec![record("TS-01", RiskGrade::Low, None, all_valid(), 0.0)]);
        dataset.cleaning = vec![
            cleaning_row("TS-01", CleaningStatus::Compliant),
            cleaning_row("TS-02", CleaningStatus::Overdue),
            cleaning_row("TS-03", CleaningStatus::DueSoon),
            cleaning_row("TS-04", CleaningStatus::Compliant),
        ];

        let compliance = compute_analytics(&dataset).compliance;
        // round(3/4 * 100) = 75
        assert_eq!(compliance.cleaning_compliance, 75);
    }

    #[test]
    fn test_contract_compliance_counts_high_and_critical_risk() {
        let mut dataset = FleetDataset::new();
        dataset.replace_master(vec![record("TS-01", RiskGrade::Low, None, all_valid(), 0.0)]);
        dataset.branding = vec![
            branding_row("TS-01", Some(RiskGrade::Low)),
            branding_row("TS-02", Some(RiskGrade::High)),
            branding_row("TS-03", Some(RiskGrade::Critical)),
            branding_row("TS-04", None),
        ];

        let compliance = compute_analytics(&dataset).compliance;
        // round(2/4 * 100) = 50
        assert_eq!(compliance.contract_compliance, 50);
    }

    #[test]
    fn test_empty_aux_tables_yield_zero_not_nan() {
        let mut dataset = FleetDataset::new();
        dataset.replace_master(vec![record("TS-01", RiskGrade::Low, None, all_valid(), 0.0)]);

        let compliance = compute_analytics(&dataset).compliance;
        assert_eq!(compliance.cleaning_compliance, 0);
        assert_eq!(compliance.contract_compliance, 0);
    }

    #[test]
    fn test_risk_tallies_are_non_exclusive() {
        let mut dataset = FleetDataset::new();
        // High urgency + Critical penalty: counts in BOTH tallies.
        dataset.replace_master(vec![record(
            "TS-01",
            RiskGrade::High,
            Some(RiskGrade::Critical),
            all_valid(),
            0.0,
        )]);

        let risk = compute_analytics(&dataset).risk;
        assert_eq!(risk.critical_risks, 1);
        assert_eq!(risk.high_risks, 1);
        assert_eq!(risk.risk_score, 15);
    }

    #[test]
    fn test_risk_score_is_capped_at_100() {
        let mut dataset = FleetDataset::new();
        let fleet = (0..15)
            .map(|i| {
                record(
                    &format!("TS-{i:02}"),
                    RiskGrade::Critical,
                    None,
                    all_valid(),
                    0.0,
                )
            })
            .collect();
        dataset.replace_master(fleet);

        let risk = compute_analytics(&dataset).risk;
        assert_eq!(risk.critical_risks, 15);
        assert_eq!(risk.risk_score, 100);
    }

    #[test]
    fn test_efficiency_metrics() {
        let mut dataset = FleetDataset::new();
        dataset.replace_master(vec![
            record("TS-01", RiskGrade::Low, None, all_valid(), 0.0),
            record("TS-02", RiskGrade::Low, None, all_valid(), 5.0),
            record("TS-03", RiskGrade::Low, None, all_valid(), 8.0),
        ]);

        let efficiency = compute_analytics(&dataset).efficiency;
        // mean(0, 5, 8) = 4.333... -> 4.3
        assert_eq!(efficiency.avg_shunting_time, 4.3);
        assert_eq!(efficiency.optimal_positioned, 1);
        // round(1/3 * 100) = 33
        assert_eq!(efficiency.positioning_efficiency, 33);
    }

    #[test]
    fn test_snapshot_is_deterministic() {
        let mut dataset = FleetDataset::new();
        dataset.replace_master(vec![record(
            "TS-01",
            RiskGrade::Critical,
            Some(RiskGrade::High),
            all_valid(),
            12.0,
        )]);

        assert_eq!(compute_analytics(&dataset), compute_analytics(&dataset));
    }
}
