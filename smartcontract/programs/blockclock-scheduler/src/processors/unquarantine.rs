use crate::{
    job::{JobId, JobStatus},
    processors::Signers,
    registry,
    store::KvStore,
    Error, Result,
};
use borsh::{BorshDeserialize, BorshSerialize};
use core::fmt;
use tracing::info;

#[derive(BorshSerialize, BorshDeserialize, PartialEq, Clone)]
pub struct UnquarantineJobArgs {
    pub job_id: JobId,
}

impl fmt::Debug for UnquarantineJobArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job_id: {}", self.job_id)
    }
}

/// Administrative reactivation. The scheduler never does this on its own.
pub fn process_unquarantine_job(
    store: &mut dyn KvStore,
    signers: Signers<'_>,
    value: &UnquarantineJobArgs,
) -> Result<()> {
    signers.check_authority()?;

    let mut entry = registry::get(&*store, &value.job_id)?;

    // Only reactivate jobs that are currently quarantined
    if entry.status != JobStatus::Quarantined {
        return Err(Error::InvalidStatus {
            job_id: entry.job_id,
            status: entry.status,
        });
    }

    entry.status = JobStatus::Active;
    registry::put(&mut *store, &entry)?;

    info!(job_id = %value.job_id, "Job reactivated");

    Ok(())
}
