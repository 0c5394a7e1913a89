//! Induction plan types: PlanStatus, PlanAssignment

use serde::{Deserialize, Serialize};

use super::TrainsetId;

// ============================================================================
// Plan Assignment
// ============================================================================

/// Operating category a trainset is inducted into for the next cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanStatus {
    /// Revenue service on the mainline
    Service,
    /// Held healthy and ready as operational reserve
    Standby,
    /// Inspection bay / workshop slot
    Maintenance,
    /// Deep-clean slot
    Cleaning,
}

impl PlanStatus {
    /// Display name matching the plan table badges.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanStatus::Service => "SERVICE",
            PlanStatus::Standby => "STANDBY",
            PlanStatus::Maintenance => "MAINTENANCE",
            PlanStatus::Cleaning => "CLEANING",
        }
    }
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One row of the generated induction plan.
///
/// The plan-generation collaborator is expected to emit exactly one row per
/// trainset, but the engine never relies on that - duplicate or missing
/// rows only shift the category counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanAssignment {
    #[serde(rename = "TrainSet_ID")]
    pub id: TrainsetId,
    #[serde(rename = "Assigned_Status")]
    pub assigned_status: PlanStatus,
    /// Human-readable reason produced by the optimizer's explainability layer
    #[serde(rename = "Justification", default)]
    pub justification: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_status_uppercase_wire_form() {
        assert_eq!(
            serde_json::to_string(&PlanStatus::Maintenance).unwrap(),
            "\"MAINTENANCE\""
        );
        let parsed: PlanStatus = serde_json::from_str("\"SERVICE\"").unwrap();
        assert_eq!(parsed, PlanStatus::Service);
    }

    #[test]
    fn test_assignment_round_trip() {
        let row = r#"{"TrainSet_ID": "TS-04", "Assigned_Status": "STANDBY"}"#;
        let assignment: PlanAssignment = serde_json::from_str(row).unwrap();
        assert_eq!(assignment.assigned_status, PlanStatus::Standby);
        assert!(assignment.justification.is_empty());
    }
}
