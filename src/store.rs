//! Fleet Dataset Store
//!
//! Holds the last-fetched fleet master records and the six auxiliary
//! compliance tables. Pure data holder: every table is replaced wholesale on
//! refresh, nothing is mutated row-by-row, and the only behavior beyond
//! storage is lookup by trainset id. Joins happen inside the analytics and
//! conflict engines via the shared identifier, never here.

use serde::{Deserialize, Serialize};

use crate::types::{
    BrandingRecord, CleaningRecord, FitnessCertificate, JobCard, MileageRecord, StablingRecord,
    TrainsetRecord,
};

/// In-memory snapshot of everything the data-fetch collaborator delivered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetDataset {
    /// Consolidated master table, one row per trainset
    pub master: Vec<TrainsetRecord>,
    /// Branding SLA tracker rows
    pub branding: Vec<BrandingRecord>,
    /// Deep-clean roster rows
    pub cleaning: Vec<CleaningRecord>,
    /// Fitness certificate registry rows
    pub fitness: Vec<FitnessCertificate>,
    /// Maintenance work order rows
    pub jobcards: Vec<JobCard>,
    /// Mileage balancing rows
    pub mileage: Vec<MileageRecord>,
    /// Stabling geometry rows
    pub stabling: Vec<StablingRecord>,
}

impl FleetDataset {
    /// Empty dataset - the state before the first fetch completes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trainsets in the master table.
    pub fn fleet_size(&self) -> usize {
        self.master.len()
    }

    /// Whether the master table has been populated yet.
    pub fn is_empty(&self) -> bool {
        self.master.is_empty()
    }

    /// Look up a master record by trainset id.
    pub fn trainset(&self, id: &str) -> Option<&TrainsetRecord> {
        self.master.iter().find(|record| record.id == id)
    }

    /// Replace the master table wholesale.
    pub fn replace_master(&mut self, master: Vec<TrainsetRecord>) {
        self.master = master;
    }

    /// Replace all six auxiliary tables wholesale.
    pub fn replace_auxiliary(
        &mut self,
        branding: Vec<BrandingRecord>,
        cleaning: Vec<CleaningRecord>,
        fitness: Vec<FitnessCertificate>,
        jobcards: Vec<JobCard>,
        mileage: Vec<MileageRecord>,
        stabling: Vec<StablingRecord>,
    ) {
        self.branding = branding;
        self.cleaning = cleaning;
        self.fitness = fitness;
        self.jobcards = jobcards;
        self.mileage = mileage;
        self.stabling = stabling;
    }
}
