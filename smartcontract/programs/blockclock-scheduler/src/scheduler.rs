//! End-of-block scheduling pass

use crate::{
    executor::{ExecutionOutcome, Executor, ExecutorAdapter},
    job::JobId,
    params, registry,
    sink::{EventSink, LogSink},
    store::KvStore,
    Error, FailureReason,
};
use serde::Serialize;
use tracing::{debug, error, info};

/// A job quarantined during a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobFailure {
    pub job_id: JobId,
    pub reason: FailureReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum TickStatus {
    Completed,
    /// No job ran. The block itself is unaffected.
    Skipped(String),
}

/// What happened during one pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub height: u64,
    pub status: TickStatus,
    pub invoked: Vec<JobId>,
    pub failures: Vec<JobFailure>,
    pub gas_used: u64,
}

impl TickReport {
    fn skipped(height: u64, err: &Error) -> Self {
        Self {
            height,
            status: TickStatus::Skipped(err.to_string()),
            invoked: Vec::new(),
            failures: Vec::new(),
            gas_used: 0,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, TickStatus::Skipped(_))
    }
}

/// Runs every active job once per block
pub struct Scheduler<E, K = LogSink> {
    adapter: ExecutorAdapter<E>,
    sink: K,
}

impl<E: Executor> Scheduler<E> {
    pub fn new(executor: E) -> Self {
        Self::with_sink(executor, LogSink)
    }
}

impl<E: Executor, K: EventSink> Scheduler<E, K> {
    pub fn with_sink(executor: E, sink: K) -> Self {
        Self {
            adapter: ExecutorAdapter::new(executor),
            sink,
        }
    }

    pub fn executor(&self) -> &E {
        self.adapter.executor()
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Run one pass at `height`.
    ///
    /// Never fails: unusable params skip the pass, and a failing job is
    /// quarantined while the remaining jobs still run in order.
    pub fn end_block(&self, store: &mut dyn KvStore, height: u64) -> TickReport {
        let params = match params::get(&*store).and_then(|p| p.validate().map(|_| p)) {
            Ok(params) => params,
            Err(err) => {
                metrics::counter!("blockclock_scheduler_skipped_ticks").increment(1);
                self.sink.on_configuration_error(height, &err);
                return TickReport::skipped(height, &err);
            }
        };

        // single snapshot; jobs registered or quarantined from here on are seen next pass
        let jobs = match registry::list(&*store, false) {
            Ok(jobs) => jobs,
            Err(err) => {
                error!(height, "Failed to load job registry: {}", err);
                metrics::counter!("blockclock_scheduler_skipped_ticks").increment(1);
                self.sink.on_configuration_error(height, &err);
                return TickReport::skipped(height, &err);
            }
        };

        let mut report = TickReport {
            height,
            status: TickStatus::Completed,
            invoked: Vec::with_capacity(jobs.len()),
            failures: Vec::new(),
            gas_used: 0,
        };

        for job in jobs {
            let outcome = self
                .adapter
                .invoke(&mut *store, &job.job_id, params.per_job_budget);

            report.invoked.push(job.job_id.clone());
            report.gas_used = report.gas_used.saturating_add(outcome.gas_used());
            metrics::histogram!("blockclock_scheduler_gas_used").record(outcome.gas_used() as f64);

            match outcome {
                ExecutionOutcome::Success { gas_used } => {
                    debug!(height, job_id = %job.job_id, gas_used, "Job succeeded");
                    metrics::counter!("blockclock_scheduler_invocations", "outcome" => "success")
                        .increment(1);
                }
                ExecutionOutcome::Failure { reason, .. } => {
                    metrics::counter!("blockclock_scheduler_invocations", "outcome" => "failure")
                        .increment(1);

                    if let Err(err) = registry::quarantine(&mut *store, &job.job_id) {
                        error!(height, job_id = %job.job_id, "Failed to quarantine job: {}", err);
                    } else {
                        metrics::counter!(
                            "blockclock_scheduler_quarantined",
                            "reason" => reason.as_str()
                        )
                        .increment(1);
                    }

                    report.failures.push(JobFailure {
                        job_id: job.job_id,
                        reason,
                    });
                }
            }
        }

        if !report.failures.is_empty() {
            self.sink.on_failures(height, &report.failures);
        }

        info!(
            height,
            invoked = report.invoked.len(),
            failed = report.failures.len(),
            gas_used = report.gas_used,
            "End block pass completed"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        executor::InvocationError,
        job::{JobEntry, JobStatus},
        meter::GasMeter,
        params::SchedulerParams,
        sink::MockEventSink,
        store::MemoryStore,
    };
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    /// Succeeds for every job except the ones listed
    struct FailingExecutor(Vec<&'static str>);

    impl Executor for FailingExecutor {
        fn execute(
            &self,
            _store: &mut dyn KvStore,
            meter: &mut GasMeter,
            job_id: &JobId,
            _msg: &[u8],
        ) -> Result<Vec<u8>, InvocationError> {
            meter.consume(1, "call")?;
            if self.0.iter().any(|id| *id == job_id.as_str()) {
                return Err(InvocationError::Fault("failing".into()));
            }
            Ok(Vec::new())
        }
    }

    fn seeded(budget: u64, jobs: &[&str]) -> MemoryStore {
        let mut store = MemoryStore::new();
        if budget > 0 {
            params::set(&mut store, &SchedulerParams::new(budget)).unwrap();
        }
        for job in jobs {
            registry::put(&mut store, &JobEntry::new(job.parse().unwrap())).unwrap();
        }
        store
    }

    #[test]
    fn test_skips_without_params() {
        let mut store = seeded(0, &["job-a"]);
        let before = store.clone();

        let mut sink = MockEventSink::new();
        sink.expect_on_configuration_error()
            .withf(|height, err| *height == 7 && matches!(err, Error::ParamsNotSet))
            .times(1)
            .return_const(());
        sink.expect_on_failures().never();

        let scheduler = Scheduler::with_sink(FailingExecutor(vec![]), sink);
        let report = scheduler.end_block(&mut store, 7);

        assert!(report.is_skipped());
        assert!(report.invoked.is_empty());
        assert_eq!(store, before);
    }

    #[test]
    fn test_failures_reported_once_per_pass() {
        let mut store = seeded(10, &["job-a", "job-b", "job-c"]);

        let mut sink = MockEventSink::new();
        sink.expect_on_failures()
            .withf(|height, failures| {
                *height == 3
                    && failures.len() == 2
                    && failures[0].job_id.as_str() == "job-a"
                    && failures[1].job_id.as_str() == "job-c"
            })
            .times(1)
            .return_const(());
        sink.expect_on_configuration_error().never();

        let scheduler = Scheduler::with_sink(FailingExecutor(vec!["job-c", "job-a"]), sink);
        let report = scheduler.end_block(&mut store, 3);

        assert_eq!(report.invoked.len(), 3);
        assert_eq!(report.gas_used, 3);
        let status: Vec<JobStatus> = registry::list(&store, true)
            .unwrap()
            .into_iter()
            .map(|e| e.status)
            .collect();
        assert_eq!(
            status,
            vec![JobStatus::Quarantined, JobStatus::Active, JobStatus::Quarantined]
        );
    }

    #[test]
    fn test_no_sink_call_without_failures() {
        let mut store = seeded(10, &["job-a"]);

        let mut sink = MockEventSink::new();
        sink.expect_on_failures().never();
        sink.expect_on_configuration_error().never();

        let report = Scheduler::with_sink(FailingExecutor(vec![]), sink).end_block(&mut store, 1);
        assert_eq!(report.status, TickStatus::Completed);
    }

    #[test]
    fn test_metrics() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let mut store = seeded(10, &["job-a", "job-b"]);
            Scheduler::new(FailingExecutor(vec!["job-b"])).end_block(&mut store, 1);

            let mut empty = MemoryStore::new();
            Scheduler::new(FailingExecutor(vec![])).end_block(&mut empty, 2);
        });

        let counters: Vec<(String, Vec<String>, u64)> = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter_map(|(key, _, _, value)| match value {
                DebugValue::Counter(v) => Some((
                    key.key().name().to_string(),
                    key.key()
                        .labels()
                        .map(|l| format!("{}={}", l.key(), l.value()))
                        .collect(),
                    v,
                )),
                _ => None,
            })
            .collect();

        let find = |name: &str, label: Option<&str>| {
            counters
                .iter()
                .find(|(n, labels, _)| {
                    n == name && label.map_or(labels.is_empty(), |l| labels.iter().any(|x| x == l))
                })
                .map(|(_, _, v)| *v)
        };

        assert_eq!(
            find("blockclock_scheduler_invocations", Some("outcome=success")),
            Some(1)
        );
        assert_eq!(
            find("blockclock_scheduler_invocations", Some("outcome=failure")),
            Some(1)
        );
        assert_eq!(
            find(
                "blockclock_scheduler_quarantined",
                Some("reason=execution_fault")
            ),
            Some(1)
        );
        assert_eq!(find("blockclock_scheduler_skipped_ticks", None), Some(1));
    }
}
