//! Shared data structures for fleet induction planning intelligence
//!
//! This module defines the core types for the induction analytics pipeline:
//! - Fleet master records and the six auxiliary compliance tables
//! - Induction plan assignments (SERVICE / STANDBY / MAINTENANCE / CLEANING)
//! - Conflict records produced by the rule-based detector
//! - Notifications held in the bounded session ledger

mod state;
mod fleet;
mod plan;
mod conflict;
mod notification;

pub use state::*;
pub use fleet::*;
pub use plan::*;
pub use conflict::*;
pub use notification::*;

/// Unique trainset identifier, e.g. `TS-07`.
///
/// Stable across the master table, the auxiliary tables, and the induction
/// plan - it is the only join key the engine uses.
pub type TrainsetId = String;
