//! Guarded job invocation
//!
//! `Executor` is the privileged call into job code and is not trusted.
//! `ExecutorAdapter` wraps it so that every invocation runs in its own store
//! branch with its own gas meter, and every possible fault, including a panic,
//! comes back as an `ExecutionOutcome`. A job only sees its own namespace
//! under `contract/<job_id>/`, never the registry or the params.

use crate::{
    job::JobId,
    meter::{GasMeter, OutOfGas},
    store::{CacheStore, KvStore, PrefixStore},
    FailureReason, END_BLOCK_MSG,
};
use std::{
    any::Any,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};
use tracing::{debug, warn};

/// Root of every job's private key space
pub const SEED_CONTRACT: &[u8] = b"contract/";

/// `contract/<job_id>/`. Jobs only ever see keys below this prefix.
pub fn contract_prefix(job_id: &JobId) -> Vec<u8> {
    [SEED_CONTRACT, job_id.as_bytes(), &b"/"[..]].concat()
}

/// Full store key of `key` as written by `job_id`
pub fn contract_key(job_id: &JobId, key: &[u8]) -> Vec<u8> {
    [contract_prefix(job_id).as_slice(), key].concat()
}

/// Errors an executor may return for a single invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    OutOfGas(OutOfGas),
    Fault(String),
    Malformed(String),
}

impl From<OutOfGas> for InvocationError {
    fn from(err: OutOfGas) -> Self {
        InvocationError::OutOfGas(err)
    }
}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationError::OutOfGas(err) => write!(f, "{err}"),
            InvocationError::Fault(msg) => write!(f, "fault: {msg}"),
            InvocationError::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl InvocationError {
    pub fn reason(&self) -> FailureReason {
        match self {
            InvocationError::OutOfGas(_) => FailureReason::BudgetExhausted,
            InvocationError::Fault(_) => FailureReason::ExecutionFault,
            InvocationError::Malformed(_) => FailureReason::MalformedResponse,
        }
    }
}

/// The privileged call into a job.
///
/// Implementations charge every unit of work to `meter` and may read and write
/// `store` freely. The store handed in is the job's own key space over a
/// private branch, committed only if the call succeeds. Scheduler state is
/// not reachable through it.
pub trait Executor {
    fn execute(
        &self,
        store: &mut dyn KvStore,
        meter: &mut GasMeter,
        job_id: &JobId,
        msg: &[u8],
    ) -> Result<Vec<u8>, InvocationError>;
}

impl<T: Executor + ?Sized> Executor for Box<T> {
    fn execute(
        &self,
        store: &mut dyn KvStore,
        meter: &mut GasMeter,
        job_id: &JobId,
        msg: &[u8],
    ) -> Result<Vec<u8>, InvocationError> {
        (**self).execute(store, meter, job_id, msg)
    }
}

impl<T: Executor + ?Sized> Executor for Arc<T> {
    fn execute(
        &self,
        store: &mut dyn KvStore,
        meter: &mut GasMeter,
        job_id: &JobId,
        msg: &[u8],
    ) -> Result<Vec<u8>, InvocationError> {
        (**self).execute(store, meter, job_id, msg)
    }
}

/// Result of invoking one job once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Success {
        gas_used: u64,
    },
    Failure {
        reason: FailureReason,
        gas_used: u64,
    },
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success { .. })
    }

    pub fn reason(&self) -> Option<FailureReason> {
        match self {
            ExecutionOutcome::Success { .. } => None,
            ExecutionOutcome::Failure { reason, .. } => Some(*reason),
        }
    }

    pub fn gas_used(&self) -> u64 {
        match self {
            ExecutionOutcome::Success { gas_used } | ExecutionOutcome::Failure { gas_used, .. } => {
                *gas_used
            }
        }
    }
}

/// Fault-containing boundary around an `Executor`
pub struct ExecutorAdapter<E> {
    executor: E,
}

impl<E: Executor> ExecutorAdapter<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Invoke `job_id` with at most `budget` gas.
    ///
    /// On success the job's writes are committed to `store`. On any failure
    /// they are discarded and `store` is exactly as it was before the call.
    pub fn invoke(
        &self,
        store: &mut dyn KvStore,
        job_id: &JobId,
        budget: u64,
    ) -> ExecutionOutcome {
        let mut branch = CacheStore::new(store);
        let mut meter = GasMeter::new(budget);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut view = PrefixStore::new(&mut branch, contract_prefix(job_id));
            self.executor
                .execute(&mut view, &mut meter, job_id, END_BLOCK_MSG)
        }));

        let gas_used = meter.consumed();

        let reason = match result {
            // an exhausted meter wins over whatever the job reported afterwards
            _ if meter.exceeded() => {
                warn!(job_id = %job_id, gas_used, "Job exceeded its gas budget");
                FailureReason::BudgetExhausted
            }
            Ok(Ok(response)) => match validate_response(&response) {
                Ok(()) => {
                    debug!(job_id = %job_id, gas_used, writes = branch.pending(), "Job executed");
                    branch.commit();
                    return ExecutionOutcome::Success { gas_used };
                }
                Err(err) => {
                    warn!(job_id = %job_id, "Job returned a malformed response: {}", err);
                    FailureReason::MalformedResponse
                }
            },
            Ok(Err(err)) => {
                warn!(job_id = %job_id, "Job execution failed: {}", err);
                err.reason()
            }
            Err(payload) => {
                let reason = panic_reason(payload.as_ref());
                warn!(
                    job_id = %job_id,
                    %reason,
                    "Job panicked: {}",
                    panic_message(payload.as_ref())
                );
                reason
            }
        };

        branch.discard();

        ExecutionOutcome::Failure { reason, gas_used }
    }
}

/// A response is either empty or a single JSON document
pub fn validate_response(response: &[u8]) -> Result<(), serde_json::Error> {
    if response.is_empty() {
        return Ok(());
    }
    serde_json::from_slice::<serde_json::Value>(response).map(|_| ())
}

fn panic_reason(payload: &(dyn Any + Send)) -> FailureReason {
    if payload.is::<OutOfGas>() {
        FailureReason::BudgetExhausted
    } else {
        FailureReason::ExecutionFault
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(err) = payload.downcast_ref::<OutOfGas>() {
        err.to_string()
    } else if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
