//! Core grading and status enums shared across the fleet datasets

use serde::{Deserialize, Serialize};

// ============================================================================
// Risk / Urgency Grades
// ============================================================================

/// Four-level grade used across the fleet datasets.
///
/// The same scale grades three independent concerns:
/// - **Mileage urgency**: how soon a trainset needs preventive maintenance
/// - **Penalty risk**: exposure to a branding SLA penalty
/// - **Job-card priority**: severity of the highest open work order
///
/// Serialized as the PascalCase strings carried by the upstream CSV exports
/// (`"Low"`, `"Medium"`, `"High"`, `"Critical"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum RiskGrade {
    #[default]
    Low = 0,
    Medium = 1,
    High = 2,
    Critical = 3,
}

impl std::fmt::Display for RiskGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskGrade::Low => write!(f, "Low"),
            RiskGrade::Medium => write!(f, "Medium"),
            RiskGrade::High => write!(f, "High"),
            RiskGrade::Critical => write!(f, "Critical"),
        }
    }
}

// ============================================================================
// Certificate Status
// ============================================================================

/// Validity state of a fitness certificate.
///
/// `Expiring` (valid but inside the 30-day renewal window) exists in the
/// certificate registry export; for service-readiness only `Valid` counts,
/// and only `Expired` trips the compliance conflict rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CertStatus {
    Valid,
    Expiring,
    Expired,
}

impl std::fmt::Display for CertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CertStatus::Valid => write!(f, "Valid"),
            CertStatus::Expiring => write!(f, "Expiring"),
            CertStatus::Expired => write!(f, "Expired"),
        }
    }
}

/// The three statutory fitness certificate categories per trainset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CertificateType {
    #[serde(rename = "Rolling-Stock")]
    RollingStock,
    Signalling,
    Telecom,
}

impl std::fmt::Display for CertificateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CertificateType::RollingStock => write!(f, "Rolling-Stock"),
            CertificateType::Signalling => write!(f, "Signalling"),
            CertificateType::Telecom => write!(f, "Telecom"),
        }
    }
}

// ============================================================================
// Cleaning Compliance
// ============================================================================

/// Deep-clean compliance state against the 15-day cleaning cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CleaningStatus {
    Compliant,
    #[serde(rename = "Due Soon")]
    DueSoon,
    Overdue,
}

impl std::fmt::Display for CleaningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CleaningStatus::Compliant => write!(f, "Compliant"),
            CleaningStatus::DueSoon => write!(f, "Due Soon"),
            CleaningStatus::Overdue => write!(f, "Overdue"),
        }
    }
}

// ============================================================================
// Work Order Status
// ============================================================================

/// Lifecycle state of a maintenance work order (job card).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorkStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Scheduled,
    Completed,
}

impl WorkStatus {
    /// Whether the work order still demands attention.
    pub fn is_outstanding(&self) -> bool {
        matches!(self, WorkStatus::Open | WorkStatus::InProgress)
    }
}

impl std::fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkStatus::Open => write!(f, "Open"),
            WorkStatus::InProgress => write!(f, "In Progress"),
            WorkStatus::Scheduled => write!(f, "Scheduled"),
            WorkStatus::Completed => write!(f, "Completed"),
        }
    }
}

// ============================================================================
// Alerting Severity
// ============================================================================

/// Severity scale for conflicts and notifications.
///
/// Distinct from [`RiskGrade`]: this is the alerting domain, serialized
/// lowercase for the dashboard and export collaborators.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_grade_ordering() {
        assert!(RiskGrade::Low < RiskGrade::Medium);
        assert!(RiskGrade::High < RiskGrade::Critical);
    }

    #[test]
    fn test_risk_grade_serialized_form() {
        let json = serde_json::to_string(&RiskGrade::Critical).unwrap();
        assert_eq!(json, "\"Critical\"");
    }

    #[test]
    fn test_cleaning_status_upstream_spelling() {
        let json = serde_json::to_string(&CleaningStatus::DueSoon).unwrap();
        assert_eq!(json, "\"Due Soon\"");
        let parsed: CleaningStatus = serde_json::from_str("\"Due Soon\"").unwrap();
        assert_eq!(parsed, CleaningStatus::DueSoon);
    }

    #[test]
    fn test_severity_lowercase_wire_form() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_certificate_type_hyphenation() {
        let json = serde_json::to_string(&CertificateType::RollingStock).unwrap();
        assert_eq!(json, "\"Rolling-Stock\"");
    }
}
