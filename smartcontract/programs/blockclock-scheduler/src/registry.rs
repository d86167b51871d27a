//! Job registry stored under `blockclock/job/<job_id>`
//!
//! `list` is the only way the scheduler enumerates jobs. It always returns
//! entries sorted by job ID, independent of insertion history.

use crate::{
    job::{JobEntry, JobId, JobStatus},
    store::KvStore,
    Error, Result,
};
use borsh::BorshDeserialize;

pub const SEED_JOB: &[u8] = b"blockclock/job/";

pub fn job_key(job_id: &JobId) -> Vec<u8> {
    [SEED_JOB, job_id.as_bytes()].concat()
}

/// Registered jobs in ascending ID order
pub fn list<S: KvStore + ?Sized>(store: &S, include_quarantined: bool) -> Result<Vec<JobEntry>> {
    let mut jobs = Vec::new();

    for (_, value) in store.prefix_iter(SEED_JOB) {
        let entry = JobEntry::try_from_slice(&value)?;
        if include_quarantined || entry.status.is_active() {
            jobs.push(entry);
        }
    }

    // execution order is by job ID, not by raw key
    jobs.sort_by(|a, b| a.job_id.cmp(&b.job_id));

    Ok(jobs)
}

pub fn get<S: KvStore + ?Sized>(store: &S, job_id: &JobId) -> Result<JobEntry> {
    let data = store
        .get(&job_key(job_id))
        .ok_or_else(|| Error::NotFound(job_id.clone()))?;
    Ok(JobEntry::try_from_slice(&data)?)
}

pub fn exists<S: KvStore + ?Sized>(store: &S, job_id: &JobId) -> bool {
    store.has(&job_key(job_id))
}

/// Upsert by job ID. Transition legality is the caller's concern.
pub fn put<S: KvStore + ?Sized>(store: &mut S, entry: &JobEntry) -> Result<()> {
    let data = borsh::to_vec(entry)?;
    store.set(&job_key(&entry.job_id), data);
    Ok(())
}

pub fn quarantine<S: KvStore + ?Sized>(store: &mut S, job_id: &JobId) -> Result<()> {
    set_status(store, job_id, JobStatus::Quarantined)
}

pub fn set_status<S: KvStore + ?Sized>(
    store: &mut S,
    job_id: &JobId,
    status: JobStatus,
) -> Result<()> {
    let mut entry = get(store, job_id)?;
    entry.status = status;
    put(store, &entry)
}

/// Administrative removal of an active entry. Quarantined entries are a
/// permanent record and are never deleted.
pub fn remove<S: KvStore + ?Sized>(store: &mut S, job_id: &JobId) -> Result<()> {
    let entry = get(store, job_id)?;
    if !entry.status.is_active() {
        return Err(Error::InvalidStatus {
            job_id: entry.job_id,
            status: entry.status,
        });
    }
    store.delete(&job_key(job_id));
    Ok(())
}

pub fn count<S: KvStore + ?Sized>(store: &S, include_quarantined: bool) -> Result<usize> {
    Ok(list(store, include_quarantined)?.len())
}
