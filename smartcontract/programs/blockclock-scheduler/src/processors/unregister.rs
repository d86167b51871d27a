use crate::{job::JobId, processors::Signers, registry, store::KvStore, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use core::fmt;
use tracing::info;

#[derive(BorshSerialize, BorshDeserialize, PartialEq, Clone)]
pub struct UnregisterJobArgs {
    pub job_id: JobId,
}

impl fmt::Debug for UnregisterJobArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job_id: {}", self.job_id)
    }
}

/// Withdraws an active job. Quarantined entries stay in the registry.
pub fn process_unregister_job(
    store: &mut dyn KvStore,
    signers: Signers<'_>,
    value: &UnregisterJobArgs,
) -> Result<()> {
    signers.check_authority()?;

    registry::remove(&mut *store, &value.job_id)?;

    info!(job_id = %value.job_id, "Unregistered job");

    Ok(())
}
