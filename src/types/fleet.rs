//! Fleet master records and the six auxiliary compliance tables
//!
//! Field names serialize to the upstream dataset column headers
//! (`TrainSet_ID`, `Urgency_Level`, ...) so that serialized rows line up with
//! what the data-fetch collaborator delivers and what the filter engine and
//! export collaborators consume.
//!
//! Tolerance rules: every field that the upstream feed can omit is either an
//! `Option` or carries `#[serde(default)]`. An unknown certificate status is
//! `None`, never `Expired` - predicates over missing data read as false.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::state::{CertStatus, CertificateType, CleaningStatus, RiskGrade, WorkStatus};
use super::TrainsetId;

// ============================================================================
// Master Record
// ============================================================================

/// Consolidated per-trainset master record.
///
/// One row per trainset, joined upstream from the certificate registry,
/// cleaning roster, job-card system, mileage balancer, branding tracker, and
/// stabling geometry. The engine treats it as read-only input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainsetRecord {
    /// Unique trainset identifier - the join key across all datasets
    #[serde(rename = "TrainSet_ID")]
    pub id: TrainsetId,

    /// Mileage-derived maintenance urgency
    #[serde(rename = "Urgency_Level", default)]
    pub urgency_level: RiskGrade,

    /// Branding SLA penalty exposure; absent for unwrapped trainsets
    #[serde(rename = "Penalty_Risk_Level", default)]
    pub penalty_risk_level: Option<RiskGrade>,

    /// Rolling-stock fitness certificate status
    #[serde(rename = "Rolling-Stock_Status", default)]
    pub rolling_stock_status: Option<CertStatus>,

    /// Signalling fitness certificate status
    #[serde(rename = "Signalling_Status", default)]
    pub signalling_status: Option<CertStatus>,

    /// Telecom fitness certificate status
    #[serde(rename = "Telecom_Status", default)]
    pub telecom_status: Option<CertStatus>,

    /// Deep-clean compliance against the 15-day cycle
    #[serde(rename = "Compliance_Status", default)]
    pub cleaning_status: Option<CleaningStatus>,

    /// Priority of the highest open job card, if any are open
    #[serde(rename = "Highest_Open_Job_Priority", default)]
    pub highest_open_job_priority: Option<RiskGrade>,

    /// Lifetime odometer (km)
    #[serde(rename = "Total_Kilometers", default)]
    pub total_kilometers: u32,

    /// Kilometers run since the last preventive maintenance
    #[serde(rename = "Kilometers_Since_Last_Maintenance", default)]
    pub km_since_last_maintenance: u32,

    /// Maintenance cycle length (km) - 5 000 for minor, 20 000 for major
    #[serde(rename = "Maintenance_Threshold", default)]
    pub maintenance_threshold: u32,

    /// Stabling track identifier, e.g. `STB-B`
    #[serde(rename = "Track_ID", default)]
    pub track_id: String,

    /// Slot position on the stabling track (1 = nearest the exit)
    #[serde(rename = "Position", default)]
    pub position: u32,

    /// Minutes of shunting needed to bring the trainset out (0 = ready)
    #[serde(rename = "Estimated_Shunting_Time_Minutes", default)]
    pub estimated_shunting_time_minutes: f64,

    /// Advertiser whose wrap the trainset carries, if any
    #[serde(rename = "Advertiser", default)]
    pub advertiser: Option<String>,
}

impl TrainsetRecord {
    /// Whether all three fitness certificates are currently `Valid`.
    ///
    /// Unknown statuses count as not ready - a trainset with a missing
    /// certificate row is never reported service-ready.
    pub fn is_service_ready(&self) -> bool {
        self.rolling_stock_status == Some(CertStatus::Valid)
            && self.signalling_status == Some(CertStatus::Valid)
            && self.telecom_status == Some(CertStatus::Valid)
    }

    /// Whether any of the three fitness certificates is `Expired`.
    pub fn has_expired_certificate(&self) -> bool {
        self.rolling_stock_status == Some(CertStatus::Expired)
            || self.signalling_status == Some(CertStatus::Expired)
            || self.telecom_status == Some(CertStatus::Expired)
    }
}

// ============================================================================
// Auxiliary Tables
// ============================================================================

/// Branding contract exposure row from the SLA tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrandingRecord {
    #[serde(rename = "TrainSet_ID")]
    pub id: TrainsetId,
    /// Advertiser holding the wrap contract
    #[serde(rename = "Advertiser", default)]
    pub advertiser: Option<String>,
    /// Contracted exposure hours for the current cycle
    #[serde(rename = "Required_Exposure_Hours", default)]
    pub required_exposure_hours: f64,
    /// Exposure hours accumulated so far this cycle
    #[serde(rename = "Accumulated_Exposure_Hours", default)]
    pub accumulated_exposure_hours: f64,
    /// Projected end-of-cycle SLA compliance (%)
    #[serde(rename = "Projected_SLA_Compliance", default)]
    pub projected_sla_compliance: f64,
    /// Penalty exposure derived from the projection
    #[serde(rename = "Penalty_Risk_Level", default)]
    pub penalty_risk_level: Option<RiskGrade>,
}

/// Deep-clean roster row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleaningRecord {
    #[serde(rename = "TrainSet_ID")]
    pub id: TrainsetId,
    /// Date of the last completed deep clean
    #[serde(rename = "Last_Deep_Clean_Date", default)]
    pub last_deep_clean_date: Option<NaiveDate>,
    #[serde(rename = "Days_Since_Last_Clean", default)]
    pub days_since_last_clean: u32,
    #[serde(rename = "Compliance_Status", default)]
    pub compliance_status: Option<CleaningStatus>,
}

/// Fitness certificate registry row - one per (trainset, certificate type).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FitnessCertificate {
    #[serde(rename = "TrainSet_ID")]
    pub id: TrainsetId,
    #[serde(rename = "Certificate_Type")]
    pub certificate_type: CertificateType,
    #[serde(rename = "Certificate_ID", default)]
    pub certificate_id: String,
    #[serde(rename = "Issue_Date", default)]
    pub issue_date: Option<NaiveDate>,
    #[serde(rename = "Expiry_Date", default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(rename = "Validity_Status", default)]
    pub validity_status: Option<CertStatus>,
}

/// Maintenance work order (job card) row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobCard {
    #[serde(rename = "Work_Order_ID")]
    pub work_order_id: String,
    #[serde(rename = "TrainSet_ID")]
    pub id: TrainsetId,
    #[serde(rename = "Maintenance_Description", default)]
    pub description: String,
    #[serde(rename = "Work_Status")]
    pub work_status: WorkStatus,
    #[serde(rename = "Priority_Level", default)]
    pub priority_level: Option<RiskGrade>,
}

/// Mileage balancing row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MileageRecord {
    #[serde(rename = "TrainSet_ID")]
    pub id: TrainsetId,
    #[serde(rename = "Total_Kilometers", default)]
    pub total_kilometers: u32,
    #[serde(rename = "Kilometers_Since_Last_Maintenance", default)]
    pub km_since_last_maintenance: u32,
    #[serde(rename = "Maintenance_Threshold", default)]
    pub maintenance_threshold: u32,
    #[serde(rename = "Urgency_Level", default)]
    pub urgency_level: RiskGrade,
}

/// Stabling geometry row - where the trainset is parked tonight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StablingRecord {
    #[serde(rename = "TrainSet_ID")]
    pub id: TrainsetId,
    #[serde(rename = "Track_ID", default)]
    pub track_id: String,
    #[serde(rename = "Position", default)]
    pub position: u32,
    #[serde(rename = "Shunting_Required", default)]
    pub shunting_required: bool,
    #[serde(rename = "Estimated_Shunting_Time_Minutes", default)]
    pub estimated_shunting_time_minutes: f64,
    /// 10-100, higher = easier to extract from the depot
    #[serde(rename = "Accessibility_Score", default)]
    pub accessibility_score: u32,
}
