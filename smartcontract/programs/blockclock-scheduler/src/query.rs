//! Read-only queries over committed state
//!
//! Callers pass the committed store. While a block is being executed the
//! committed store is mutably borrowed by the block's branch, so in-progress
//! pass state is unreachable from here.

use crate::{
    job::{JobEntry, JobId},
    params::{self, SchedulerParams},
    registry,
    store::KvStore,
    Result,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryActiveJobsResponse {
    pub job_ids: Vec<JobId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryJobsResponse {
    pub jobs: Vec<JobEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryJobResponse {
    pub job: JobEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParamsResponse {
    pub params: SchedulerParams,
}

/// Active job IDs in execution order
pub fn active_jobs<S: KvStore + ?Sized>(store: &S) -> Result<QueryActiveJobsResponse> {
    let job_ids = registry::list(store, false)?
        .into_iter()
        .map(|entry| entry.job_id)
        .collect();
    Ok(QueryActiveJobsResponse { job_ids })
}

pub fn jobs<S: KvStore + ?Sized>(store: &S, include_quarantined: bool) -> Result<QueryJobsResponse> {
    Ok(QueryJobsResponse {
        jobs: registry::list(store, include_quarantined)?,
    })
}

pub fn job<S: KvStore + ?Sized>(store: &S, job_id: &JobId) -> Result<QueryJobResponse> {
    Ok(QueryJobResponse {
        job: registry::get(store, job_id)?,
    })
}

pub fn params<S: KvStore + ?Sized>(store: &S) -> Result<QueryParamsResponse> {
    Ok(QueryParamsResponse {
        params: params::get(store)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{store::MemoryStore, Error};

    #[test]
    fn test_queries() {
        let mut store = MemoryStore::new();
        params::set(&mut store, &SchedulerParams::new(100)).unwrap();
        for id in ["b", "a", "c"] {
            registry::put(&mut store, &JobEntry::new(id.parse().unwrap())).unwrap();
        }
        registry::quarantine(&mut store, &"b".parse().unwrap()).unwrap();

        let active = active_jobs(&store).unwrap();
        let ids: Vec<&str> = active.job_ids.iter().map(JobId::as_str).collect();
        assert_eq!(ids, vec!["a", "c"]);

        assert_eq!(jobs(&store, true).unwrap().jobs.len(), 3);
        assert_eq!(params(&store).unwrap().params.per_job_budget, 100);
        assert!(!job(&store, &"b".parse().unwrap()).unwrap().job.status.is_active());
        assert!(matches!(
            job(&store, &"z".parse().unwrap()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_active_jobs_json() {
        let mut store = MemoryStore::new();
        registry::put(&mut store, &JobEntry::new("job-1".parse().unwrap())).unwrap();

        let json = serde_json::to_string(&active_jobs(&store).unwrap()).unwrap();
        assert_eq!(json, r#"{"job_ids":["job-1"]}"#);
    }
}
