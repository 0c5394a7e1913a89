//! Induction Constraint Configuration
//!
//! Operator-tunable fleet constraints loaded from TOML, replacing the
//! hardcoded planner parameters with per-depot values.
//!
//! ## Loading Order
//!
//! 1. `RAIL_INDUCT_CONFIG` environment variable (path to TOML file)
//! 2. `induction_config.toml` in the current working directory
//! 3. Built-in defaults (matching the reference planner parameters)
//!
//! The configuration is passed explicitly into the analytics and conflict
//! engines rather than held in a global - the host application owns the
//! current snapshot and hands it to each evaluation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

// ============================================================================
// Errors
// ============================================================================

/// Failure while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ============================================================================
// Constraint Configuration
// ============================================================================

/// Objective weights forwarded to the external plan optimizer.
///
/// The conflict rules never consume these; they ride along so that one
/// configuration document drives both the optimizer and this engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ObjectiveWeights {
    /// Branding SLA revenue protection weight
    #[serde(default = "default_w_sla")]
    pub w_sla: f64,
    /// Overdue deep-clean priority weight
    #[serde(default = "default_w_cleaning")]
    pub w_cleaning: f64,
    /// Mileage-balancing penalty weight
    #[serde(default = "default_w_mileage")]
    pub w_mileage: f64,
    /// Shunting-time penalty weight
    #[serde(default = "default_w_shunting")]
    pub w_shunting: f64,
}

fn default_w_sla() -> f64 {
    50.0
}
fn default_w_cleaning() -> f64 {
    20.0
}
fn default_w_mileage() -> f64 {
    10.0
}
fn default_w_shunting() -> f64 {
    5.0
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            w_sla: default_w_sla(),
            w_cleaning: default_w_cleaning(),
            w_mileage: default_w_mileage(),
            w_shunting: default_w_shunting(),
        }
    }
}

/// Fleet constraint configuration for one operating cycle.
///
/// The capacity fields are signed: the engine never rejects negative or
/// oversized values, it only warns via [`InductionConfig::validate`] and
/// evaluates the comparisons as written. Enforcement of sane ranges belongs
/// to the configuration-editing collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InductionConfig {
    /// Trainsets that must enter revenue service
    #[serde(default = "default_required_service_fleet")]
    pub required_service_fleet: i64,
    /// Minimum operational reserve held on standby
    #[serde(default = "default_min_standby_fleet")]
    pub min_standby_fleet: i64,
    /// Inspection bay capacity
    #[serde(default = "default_max_maintenance_trains")]
    pub max_maintenance_trains: i64,
    /// Overnight deep-clean slot capacity
    #[serde(default = "default_max_cleaning_trains")]
    pub max_cleaning_trains: i64,
    /// Optimizer objective weights (pass-through)
    #[serde(default)]
    pub weights: ObjectiveWeights,
}

fn default_required_service_fleet() -> i64 {
    8
}
fn default_min_standby_fleet() -> i64 {
    3
}
fn default_max_maintenance_trains() -> i64 {
    4
}
fn default_max_cleaning_trains() -> i64 {
    7
}

impl Default for InductionConfig {
    fn default() -> Self {
        Self {
            required_service_fleet: default_required_service_fleet(),
            min_standby_fleet: default_min_standby_fleet(),
            max_maintenance_trains: default_max_maintenance_trains(),
            max_cleaning_trains: default_max_cleaning_trains(),
            weights: ObjectiveWeights::default(),
        }
    }
}

impl InductionConfig {
    /// Load configuration using the standard search order:
    /// 1. `RAIL_INDUCT_CONFIG` environment variable
    /// 2. `./induction_config.toml` in the current working directory
    /// 3. Built-in defaults (reference planner parameters)
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("RAIL_INDUCT_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded induction config from RAIL_INDUCT_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from RAIL_INDUCT_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "RAIL_INDUCT_CONFIG points to non-existent file, falling back");
            }
        }

        let local = Path::new("induction_config.toml");
        if local.exists() {
            match Self::load_from_file(local) {
                Ok(config) => {
                    info!(path = %local.display(), "Loaded induction config from working directory");
                    return config;
                }
                Err(e) => {
                    warn!(path = %local.display(), error = %e, "Failed to load local config, using defaults");
                }
            }
        }

        info!("No induction config file found, using built-in defaults");
        Self::default()
    }

    /// Load and parse a specific TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Sanity-check the constraint fields.
    ///
    /// Returns warnings rather than errors: the engine stays well-defined on
    /// out-of-range input, the operator just gets told the plan evaluation
    /// may be meaningless.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (name, value) in [
            ("required_service_fleet", self.required_service_fleet),
            ("min_standby_fleet", self.min_standby_fleet),
            ("max_maintenance_trains", self.max_maintenance_trains),
            ("max_cleaning_trains", self.max_cleaning_trains),
        ] {
            if value < 0 {
                warnings.push(format!("{name} is negative ({value})"));
            }
        }

        for (name, value) in [
            ("w_sla", self.weights.w_sla),
            ("w_cleaning", self.weights.w_cleaning),
            ("w_mileage", self.weights.w_mileage),
            ("w_shunting", self.weights.w_shunting),
        ] {
            if value < 0.0 {
                warnings.push(format!("{name} is negative ({value})"));
            }
        }

        warnings
    }
}
