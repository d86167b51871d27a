//! Scheduler parameters stored under a single key

use crate::{store::KvStore, Error, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SEED_PARAMS: &[u8] = b"blockclock/params";

/// Gas granted to a single job invocation unless configured otherwise
pub const DEFAULT_PER_JOB_BUDGET: u64 = 100_000;

#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SchedulerParams {
    pub per_job_budget: u64,
}

impl SchedulerParams {
    pub fn new(per_job_budget: u64) -> Self {
        Self { per_job_budget }
    }

    pub fn validate(&self) -> Result<()> {
        if self.per_job_budget == 0 {
            return Err(Error::InvalidParams(
                "per_job_budget must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self {
            per_job_budget: DEFAULT_PER_JOB_BUDGET,
        }
    }
}

impl fmt::Display for SchedulerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "per_job_budget: {}", self.per_job_budget)
    }
}

/// Stored params, or `ParamsNotSet` if none were ever written
pub fn get<S: KvStore + ?Sized>(store: &S) -> Result<SchedulerParams> {
    let data = store.get(SEED_PARAMS).ok_or(Error::ParamsNotSet)?;
    Ok(SchedulerParams::try_from_slice(&data)?)
}

/// Validates before writing; rejected params leave the store untouched
pub fn set<S: KvStore + ?Sized>(store: &mut S, params: &SchedulerParams) -> Result<()> {
    params.validate()?;
    store.set(SEED_PARAMS, borsh::to_vec(params)?);
    Ok(())
}
