//! Conflict record types: ConflictKind, Conflict

use serde::{Deserialize, Serialize};

use super::state::Severity;
use super::TrainsetId;

// ============================================================================
// Conflict Records
// ============================================================================

/// Category of a detected plan conflict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Plan falls short of a required fleet count
    ResourceConflict,
    /// Plan exceeds a physical depot capacity
    CapacityConflict,
    /// Unsafe trainset placed into revenue service
    SafetyConflict,
    /// Statutory certificate violation in revenue service
    ComplianceConflict,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictKind::ResourceConflict => write!(f, "Resource"),
            ConflictKind::CapacityConflict => write!(f, "Capacity"),
            ConflictKind::SafetyConflict => write!(f, "Safety"),
            ConflictKind::ComplianceConflict => write!(f, "Compliance"),
        }
    }
}

/// A detected violation of a capacity, resource, safety, or compliance rule
/// against the current induction plan.
///
/// Conflicts are re-derived from scratch on every evaluation; they carry no
/// identity across runs beyond the stable rule `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conflict {
    /// Stable rule identifier, e.g. `insufficient-service-fleet`
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub severity: Severity,
    pub title: String,
    /// Human-readable description interpolating the observed and limit counts
    pub description: String,
    /// Fixed suggested remedy for this rule
    pub suggestion: String,
    /// Trainsets implicated by the rule, in plan order; may be empty
    pub affected_trainsets: Vec<TrainsetId>,
}
