//! Depot Fleet Simulation
//!
//! Generates a realistic synthetic fleet for exercising the induction
//! analytics engine without a live data feed: fitness certificates with
//! issue/expiry windows, the 15-day deep-clean cycle, mileage thresholds,
//! three-track stabling geometry, and branding SLA projections. A simple
//! roster fill stands in for the external optimizer so the conflict rules
//! have a plan to evaluate.
//!
//! # Usage
//! ```bash
//! ./depot-sim --trains 25 --seed 42 --pretty
//! RUST_LOG=debug ./depot-sim --service-fleet 12
//! ```

use anyhow::Context;
use chrono::{Duration, NaiveDate, Utc};
use clap::Parser;
use rand::prelude::*;

use rail_induct::types::{
    BrandingRecord, CertStatus, CertificateType, CleaningRecord, CleaningStatus,
    FitnessCertificate, JobCard, MileageRecord, PlanAssignment, PlanStatus, RiskGrade,
    StablingRecord, TrainsetRecord, WorkStatus,
};
use rail_induct::{FleetDataset, InductionBoard, InductionConfig};

// ============================================================================
// Depot Constants
// ============================================================================

/// Deep-clean cycle length (days)
const DEEP_CLEAN_CYCLE_DAYS: i64 = 15;
/// Certificate validity periods (days) per certificate type
const CERT_VALIDITY: [(CertificateType, i64); 3] = [
    (CertificateType::RollingStock, 90),
    (CertificateType::Signalling, 180),
    (CertificateType::Telecom, 120),
];
/// Stabling tracks and their slot counts
const TRACKS: [(&str, u32); 3] = [("STB-A", 8), ("STB-B", 9), ("STB-C", 8)];
/// Advertisers holding wrap contracts
const ADVERTISERS: [&str; 8] = [
    "Lulu Mall",
    "Federal Bank",
    "Muthoot Finance",
    "Apollo Tyres",
    "Malayala Manorama",
    "VKC Pride",
    "Eastern Condiments",
    "MyG",
];

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "depot-sim")]
#[command(about = "Synthetic fleet simulation for the induction analytics engine")]
#[command(version = "1.0")]
struct Args {
    /// Fleet size
    #[arg(short, long, default_value = "25", value_parser = clap::value_parser!(u32).range(1..=100))]
    trains: u32,

    /// Required service fleet
    #[arg(long, default_value = "8")]
    service_fleet: i64,

    /// Minimum standby fleet
    #[arg(long, default_value = "3")]
    min_standby: i64,

    /// Maintenance bay capacity
    #[arg(long, default_value = "4")]
    max_maintenance: i64,

    /// Cleaning slot capacity
    #[arg(long, default_value = "7")]
    max_cleaning: i64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Pretty-print the JSON report
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    tracing::info!(seed, trains = args.trains, "Generating synthetic fleet");

    let today = Utc::now().date_naive();
    let dataset = generate_fleet(&mut rng, args.trains as usize, today);

    let config = InductionConfig {
        required_service_fleet: args.service_fleet,
        min_standby_fleet: args.min_standby,
        max_maintenance_trains: args.max_maintenance,
        max_cleaning_trains: args.max_cleaning,
        ..InductionConfig::default()
    };

    let plan = fabricate_plan(&dataset, &config);

    let mut board = InductionBoard::new(config);
    board.load_dataset(dataset);
    board.apply_plan(plan);

    let report = board.report();
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("failed to serialize plan report")?;
    println!("{rendered}");

    Ok(())
}

// ============================================================================
// Fleet Generation
// ============================================================================

fn generate_fleet(rng: &mut StdRng, trains: usize, today: NaiveDate) -> FleetDataset {
    let ids: Vec<String> = (1..=trains).map(|i| format!("TS-{i:02}")).collect();

    let fitness = generate_certificates(rng, &ids, today);
    let cleaning = generate_cleaning(rng, &ids, today);
    let mileage = generate_mileage(rng, &ids);
    let stabling = generate_stabling(rng, &ids);
    let branding = generate_branding(rng, &ids);
    let jobcards = generate_jobcards(rng, &ids);

    let master = consolidate(&ids, &fitness, &cleaning, &mileage, &stabling, &branding, &jobcards);

    let mut dataset = FleetDataset::new();
    dataset.replace_master(master);
    dataset.replace_auxiliary(branding, cleaning, fitness, jobcards, mileage, stabling);
    dataset
}

fn generate_certificates(
    rng: &mut StdRng,
    ids: &[String],
    today: NaiveDate,
) -> Vec<FitnessCertificate> {
    let mut rows = Vec::with_capacity(ids.len() * CERT_VALIDITY.len());
    for id in ids {
        for (cert_type, validity_days) in CERT_VALIDITY {
            let issue_date = today - Duration::days(rng.gen_range(1..90));
            let expiry_date = issue_date + Duration::days(validity_days);
            let status = if expiry_date < today {
                CertStatus::Expired
            } else if expiry_date < today + Duration::days(30) {
                CertStatus::Expiring
            } else {
                CertStatus::Valid
            };
            rows.push(FitnessCertificate {
                id: id.clone(),
                certificate_type: cert_type,
                certificate_id: format!("CERT-{}", rng.gen_range(10_000..100_000)),
                issue_date: Some(issue_date),
                expiry_date: Some(expiry_date),
                validity_status: Some(status),
            });
        }
    }
    rows
}

fn generate_cleaning(rng: &mut StdRng, ids: &[String], today: NaiveDate) -> Vec<CleaningRecord> {
    ids.iter()
        .map(|id| {
            let days_ago = rng.gen_range(1..21);
            let status = if days_ago > DEEP_CLEAN_CYCLE_DAYS {
                CleaningStatus::Overdue
            } else if days_ago >= DEEP_CLEAN_CYCLE_DAYS - 1 {
                CleaningStatus::DueSoon
            } else {
                CleaningStatus::Compliant
            };
            CleaningRecord {
                id: id.clone(),
                last_deep_clean_date: Some(today - Duration::days(days_ago)),
                days_since_last_clean: days_ago as u32,
                compliance_status: Some(status),
            }
        })
        .collect()
}

fn generate_mileage(rng: &mut StdRng, ids: &[String]) -> Vec<MileageRecord> {
    ids.iter()
        .map(|id| {
            // Minor services dominate the cycle mix.
            let threshold: u32 = if rng.gen_bool(0.7) { 5_000 } else { 20_000 };
            let km_since = rng
                .gen_range(100..(threshold as f64 * 1.05) as u32)
                .min(threshold + 500);
            let pct_used = f64::from(km_since) / f64::from(threshold) * 100.0;
            let urgency = if pct_used > 98.0 {
                RiskGrade::Critical
            } else if pct_used >= 90.0 {
                RiskGrade::High
            } else if pct_used >= 75.0 {
                RiskGrade::Medium
            } else {
                RiskGrade::Low
            };
            MileageRecord {
                id: id.clone(),
                total_kilometers: rng.gen_range(40_000..65_000),
                km_since_last_maintenance: km_since,
                maintenance_threshold: threshold,
                urgency_level: urgency,
            }
        })
        .collect()
}

fn generate_stabling(rng: &mut StdRng, ids: &[String]) -> Vec<StablingRecord> {
    let mut slots: Vec<(&str, u32)> = TRACKS
        .iter()
        .flat_map(|(track, count)| (1..=*count).map(move |pos| (*track, pos)))
        .collect();
    slots.shuffle(rng);

    ids.iter()
        .zip(slots)
        .map(|(id, (track, position))| {
            let (shunting_required, minutes, score) = if position <= 2 {
                (false, 0.0, 100)
            } else {
                (
                    true,
                    f64::from(2 + (position - 2) * 3),
                    100_u32.saturating_sub((position - 2) * 15).max(10),
                )
            };
            StablingRecord {
                id: id.clone(),
                track_id: track.to_string(),
                position,
                shunting_required,
                estimated_shunting_time_minutes: minutes,
                accessibility_score: score,
            }
        })
        .collect()
}

fn generate_branding(rng: &mut StdRng, ids: &[String]) -> Vec<BrandingRecord> {
    // Roughly 80% of the fleet carries a wrap.
    let mut wrapped: Vec<&String> = ids.iter().collect();
    wrapped.shuffle(rng);
    wrapped.truncate(ids.len() * 4 / 5);

    wrapped
        .into_iter()
        .map(|id| {
            let required = f64::from(rng.gen_range(180..221));
            let accumulated = required * rng.gen_range(0.55..1.15);
            let projected = accumulated / required * 100.0;
            let risk = if projected < 95.0 {
                RiskGrade::Critical
            } else if projected < 100.0 {
                RiskGrade::High
            } else if projected < 105.0 {
                RiskGrade::Medium
            } else {
                RiskGrade::Low
            };
            BrandingRecord {
                id: id.clone(),
                advertiser: Some((*ADVERTISERS.choose(rng).unwrap_or(&ADVERTISERS[0])).to_string()),
                required_exposure_hours: required,
                accumulated_exposure_hours: (accumulated * 10.0).round() / 10.0,
                projected_sla_compliance: (projected * 10.0).round() / 10.0,
                penalty_risk_level: Some(risk),
            }
        })
        .collect()
}

fn generate_jobcards(rng: &mut StdRng, ids: &[String]) -> Vec<JobCard> {
    const TASKS: [(&str, RiskGrade); 8] = [
        ("Unscheduled brake system inspection", RiskGrade::Critical),
        ("Door mechanism fault on coach B", RiskGrade::Critical),
        ("Traction motor overheating diagnosis", RiskGrade::High),
        ("Pantograph arcing and carbon deposit cleaning", RiskGrade::High),
        ("HVAC compressor check", RiskGrade::Medium),
        ("Brake pad replacement and calibration", RiskGrade::Medium),
        ("Cosmetic scratch on exterior wrap", RiskGrade::Low),
        ("One interior light out in coach C", RiskGrade::Low),
    ];
    const STATUSES: [WorkStatus; 4] = [
        WorkStatus::Completed,
        WorkStatus::Scheduled,
        WorkStatus::InProgress,
        WorkStatus::Open,
    ];

    (0..40)
        .map(|i| {
            let (description, priority) = TASKS[rng.gen_range(0..TASKS.len())];
            JobCard {
                work_order_id: format!("WO-{}", 20_250_912 + i),
                id: ids[rng.gen_range(0..ids.len())].clone(),
                description: description.to_string(),
                work_status: STATUSES[rng.gen_range(0..STATUSES.len())],
                priority_level: Some(priority),
            }
        })
        .collect()
}

/// Join the six generated tables into the consolidated master rows, the way
/// the upstream consolidation script builds `master_train_data.csv`.
fn consolidate(
    ids: &[String],
    fitness: &[FitnessCertificate],
    cleaning: &[CleaningRecord],
    mileage: &[MileageRecord],
    stabling: &[StablingRecord],
    branding: &[BrandingRecord],
    jobcards: &[JobCard],
) -> Vec<TrainsetRecord> {
    ids.iter()
        .map(|id| {
            let cert_status = |cert_type: CertificateType| {
                fitness
                    .iter()
                    .find(|row| row.id == *id && row.certificate_type == cert_type)
                    .and_then(|row| row.validity_status)
            };
            let mileage_row = mileage.iter().find(|row| row.id == *id);
            let stabling_row = stabling.iter().find(|row| row.id == *id);
            let branding_row = branding.iter().find(|row| row.id == *id);
            let highest_open_priority = jobcards
                .iter()
                .filter(|card| card.id == *id && card.work_status.is_outstanding())
                .filter_map(|card| card.priority_level)
                .max();

            TrainsetRecord {
                id: id.clone(),
                urgency_level: mileage_row.map(|row| row.urgency_level).unwrap_or_default(),
                penalty_risk_level: branding_row.and_then(|row| row.penalty_risk_level),
                rolling_stock_status: cert_status(CertificateType::RollingStock),
                signalling_status: cert_status(CertificateType::Signalling),
                telecom_status: cert_status(CertificateType::Telecom),
                cleaning_status: cleaning
                    .iter()
                    .find(|row| row.id == *id)
                    .and_then(|row| row.compliance_status),
                highest_open_job_priority: highest_open_priority,
                total_kilometers: mileage_row.map_or(0, |row| row.total_kilometers),
                km_since_last_maintenance: mileage_row
                    .map_or(0, |row| row.km_since_last_maintenance),
                maintenance_threshold: mileage_row.map_or(0, |row| row.maintenance_threshold),
                track_id: stabling_row.map_or_else(String::new, |row| row.track_id.clone()),
                position: stabling_row.map_or(0, |row| row.position),
                estimated_shunting_time_minutes: stabling_row
                    .map_or(0.0, |row| row.estimated_shunting_time_minutes),
                advertiser: branding_row.and_then(|row| row.advertiser.clone()),
            }
        })
        .collect()
}

// ============================================================================
// Plan Fabrication
// ============================================================================

/// Simple roster fill standing in for the external optimizer: worst urgency
/// to the maintenance bays, overdue cleans to the cleaning slots, then the
/// service requirement from the best-positioned remainder, rest on standby.
fn fabricate_plan(dataset: &FleetDataset, config: &InductionConfig) -> Vec<PlanAssignment> {
    let mut remaining: Vec<&TrainsetRecord> = dataset.master.iter().collect();
    let mut plan = Vec::with_capacity(remaining.len());

    remaining.sort_by(|a, b| b.urgency_level.cmp(&a.urgency_level));
    let urgent = remaining
        .iter()
        .filter(|r| r.urgency_level >= RiskGrade::High)
        .count();
    assign_from(
        &mut remaining,
        urgent.min(config.max_maintenance_trains.max(0) as usize),
        PlanStatus::Maintenance,
        "High mileage urgency routed to inspection bay",
        &mut plan,
    );

    remaining.sort_by_key(|r| match r.cleaning_status {
        Some(CleaningStatus::Overdue) => 0,
        Some(CleaningStatus::DueSoon) => 1,
        _ => 2,
    });
    let overdue = remaining
        .iter()
        .filter(|r| r.cleaning_status == Some(CleaningStatus::Overdue))
        .count();
    assign_from(
        &mut remaining,
        overdue.min(config.max_cleaning_trains.max(0) as usize),
        PlanStatus::Cleaning,
        "Overdue for 15-day deep clean",
        &mut plan,
    );

    // Best depot position first for the service requirement.
    remaining.sort_by(|a, b| {
        a.estimated_shunting_time_minutes
            .total_cmp(&b.estimated_shunting_time_minutes)
    });
    assign_from(
        &mut remaining,
        config.required_service_fleet.max(0) as usize,
        PlanStatus::Service,
        "Assigned to meet daily service fleet requirement",
        &mut plan,
    );
    assign_from(
        &mut remaining,
        usize::MAX,
        PlanStatus::Standby,
        "Healthy and available; held as operational reserve",
        &mut plan,
    );

    plan
}

/// Move up to `count` trainsets from the front of the pool into the plan.
fn assign_from(
    pool: &mut Vec<&TrainsetRecord>,
    count: usize,
    status: PlanStatus,
    justification: &str,
    plan: &mut Vec<PlanAssignment>,
) {
    let count = count.min(pool.len());
    for record in pool.drain(..count) {
        plan.push(PlanAssignment {
            id: record.id.clone(),
            assigned_status: status,
            justification: justification.to_string(),
        });
    }
}
