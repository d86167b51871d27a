//! Blockclock Scheduler - per-block job execution with gas metering and quarantine
//!
//! Every block, each active job registered in the store is invoked once with a
//! bounded gas budget. A job whose invocation fails is quarantined and skipped
//! by every later pass. The pass itself never fails the block.

pub mod error;
pub mod executor;
pub mod genesis;
pub mod instructions;
pub mod job;
pub mod meter;
pub mod params;
pub mod processors;
pub mod query;
pub mod registry;
pub mod scheduler;
pub mod sink;
pub mod store;

pub use error::{Error, FailureReason, Result};
pub use executor::{ExecutionOutcome, Executor, ExecutorAdapter, InvocationError};
pub use genesis::GenesisState;
pub use job::{JobEntry, JobId, JobStatus};
pub use meter::{GasMeter, OutOfGas};
pub use params::SchedulerParams;
pub use scheduler::{JobFailure, Scheduler, TickReport, TickStatus};
pub use sink::{EventSink, LogSink};
pub use store::{CacheStore, KvStore, MemoryStore, PrefixStore};

/// Message delivered to every job at the end of a block
pub const END_BLOCK_MSG: &[u8] = br#"{"clock_end_block":{}}"#;

/// Library version recorded in exported genesis files
pub const SCHEDULER_VERSION: u8 = 1;
