//! Error types for the scheduler

use crate::job::{JobId, JobStatus};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Job not found: {0}")]
    NotFound(JobId),

    #[error("Job already registered: {0}")]
    DuplicateJob(JobId),

    #[error("Invalid job ID: {0}")]
    InvalidJobId(String),

    #[error("Invalid job status for {job_id}: {status}")]
    InvalidStatus { job_id: JobId, status: JobStatus },

    #[error("Invalid scheduler params: {0}")]
    InvalidParams(String),

    #[error("Scheduler params are not set")]
    ParamsNotSet,

    #[error("Sender {0} is not allowed to execute this action")]
    Unauthorized(String),

    #[error("Invalid instruction data")]
    InvalidInstruction,

    #[error("Invalid genesis state: {0}")]
    InvalidGenesis(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] borsh::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Errors that make a scheduling pass impossible to run
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::InvalidParams(_) | Error::ParamsNotSet)
    }
}

/// Why a job invocation failed. Any failure quarantines the job.
#[repr(u8)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[borsh(use_discriminant = true)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    ExecutionFault = 1,
    BudgetExhausted = 2,
    MalformedResponse = 3,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::ExecutionFault => "execution_fault",
            FailureReason::BudgetExhausted => "budget_exhausted",
            FailureReason::MalformedResponse => "malformed_response",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
