use crate::{
    job::{JobEntry, JobId},
    processors::Signers,
    registry,
    store::KvStore,
    Error, Result,
};
use borsh::{BorshDeserialize, BorshSerialize};
use core::fmt;
use tracing::info;

#[derive(BorshSerialize, BorshDeserialize, PartialEq, Clone)]
pub struct RegisterJobArgs {
    pub job_id: JobId,
}

impl fmt::Debug for RegisterJobArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job_id: {}", self.job_id)
    }
}

pub fn process_register_job(
    store: &mut dyn KvStore,
    signers: Signers<'_>,
    value: &RegisterJobArgs,
) -> Result<()> {
    signers.check_authority()?;

    if registry::exists(&*store, &value.job_id) {
        return Err(Error::DuplicateJob(value.job_id.clone()));
    }

    registry::put(&mut *store, &JobEntry::new(value.job_id.clone()))?;

    info!(job_id = %value.job_id, "Registered job");

    Ok(())
}
