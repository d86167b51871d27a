use crate::{
    params::{self, SchedulerParams},
    processors::Signers,
    store::KvStore,
    Result,
};
use borsh::{BorshDeserialize, BorshSerialize};
use core::fmt;
use tracing::info;

#[derive(BorshSerialize, BorshDeserialize, PartialEq, Clone)]
pub struct UpdateParamsArgs {
    pub params: SchedulerParams,
}

impl fmt::Debug for UpdateParamsArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.params)
    }
}

pub fn process_update_params(
    store: &mut dyn KvStore,
    signers: Signers<'_>,
    value: &UpdateParamsArgs,
) -> Result<()> {
    signers.check_authority()?;

    params::set(&mut *store, &value.params)?;

    info!(per_job_budget = value.params.per_job_budget, "Updated scheduler params");

    Ok(())
}
