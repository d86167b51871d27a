//! Chain start and export state

use crate::{
    job::{validate_job_id, JobEntry},
    params::{self, SchedulerParams},
    registry,
    store::KvStore,
    Error, Result, SCHEDULER_VERSION,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

fn default_version() -> u8 {
    SCHEDULER_VERSION
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    #[serde(default = "default_version")]
    pub version: u8,
    pub params: SchedulerParams,
    #[serde(default)]
    pub jobs: Vec<JobEntry>,
}

impl Default for GenesisState {
    fn default() -> Self {
        Self {
            version: SCHEDULER_VERSION,
            params: SchedulerParams::default(),
            jobs: Vec::new(),
        }
    }
}

impl GenesisState {
    pub fn new(params: SchedulerParams, jobs: Vec<JobEntry>) -> Self {
        Self {
            version: SCHEDULER_VERSION,
            params,
            jobs,
        }
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != SCHEDULER_VERSION {
            return Err(Error::InvalidGenesis(format!(
                "unsupported version {} (expected {})",
                self.version, SCHEDULER_VERSION
            )));
        }

        self.params.validate()?;

        let mut seen = BTreeSet::new();
        for entry in &self.jobs {
            validate_job_id(entry.job_id.as_str())?;
            if !seen.insert(&entry.job_id) {
                return Err(Error::InvalidGenesis(format!(
                    "duplicate job {}",
                    entry.job_id
                )));
            }
        }

        Ok(())
    }
}

/// Load `genesis` into `store`. Nothing is written unless the state validates.
pub fn init_genesis<S: KvStore + ?Sized>(store: &mut S, genesis: &GenesisState) -> Result<()> {
    genesis.validate()?;

    params::set(store, &genesis.params)?;
    for entry in &genesis.jobs {
        registry::put(store, entry)?;
    }

    info!(
        jobs = genesis.jobs.len(),
        per_job_budget = genesis.params.per_job_budget,
        "Initialized scheduler genesis"
    );

    Ok(())
}

/// Snapshot of params and every job, quarantined ones included, sorted by ID
pub fn export_genesis<S: KvStore + ?Sized>(store: &S) -> Result<GenesisState> {
    Ok(GenesisState::new(
        params::get(store)?,
        registry::list(store, true)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{job::JobStatus, store::MemoryStore};

    fn entry(id: &str) -> JobEntry {
        JobEntry::new(id.parse().unwrap())
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let genesis = GenesisState::new(
            SchedulerParams::default(),
            vec![entry("job-a"), entry("job-a").quarantined()],
        );
        assert!(matches!(genesis.validate(), Err(Error::InvalidGenesis(_))));
    }

    #[test]
    fn test_validate_rejects_zero_budget() {
        let genesis = GenesisState::new(SchedulerParams::new(0), vec![]);
        assert!(matches!(genesis.validate(), Err(Error::InvalidParams(_))));

        let mut store = MemoryStore::new();
        assert!(init_genesis(&mut store, &genesis).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_from_json_defaults() {
        let genesis =
            GenesisState::from_json(r#"{"params":{"per_job_budget":500}}"#).unwrap();
        assert_eq!(genesis.version, SCHEDULER_VERSION);
        assert_eq!(genesis.params.per_job_budget, 500);
        assert!(genesis.jobs.is_empty());
    }

    #[test]
    fn test_from_json_rejects_bad_job_id() {
        let res = GenesisState::from_json(
            r#"{"params":{"per_job_budget":1},"jobs":[{"job_id":"bad id","status":"active"}]}"#,
        );
        assert!(matches!(res, Err(Error::Json(_))));
    }

    #[test]
    fn test_export_sorted_with_quarantined() {
        let mut store = MemoryStore::new();
        let genesis = GenesisState::new(
            SchedulerParams::new(42),
            vec![entry("job-c"), entry("job-a").quarantined(), entry("job-b")],
        );
        init_genesis(&mut store, &genesis).unwrap();

        let exported = export_genesis(&store).unwrap();
        let ids: Vec<&str> = exported.jobs.iter().map(|e| e.job_id.as_str()).collect();
        assert_eq!(ids, vec!["job-a", "job-b", "job-c"]);
        assert_eq!(exported.jobs[0].status, JobStatus::Quarantined);
        assert_eq!(exported.params.per_job_budget, 42);
    }

    #[test]
    fn test_export_without_params() {
        let store = MemoryStore::new();
        assert!(matches!(export_genesis(&store), Err(Error::ParamsNotSet)));
    }
}
