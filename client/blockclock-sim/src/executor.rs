use crate::scenario::{Scenario, Step};
use blockclock_scheduler::{Executor, GasMeter, InvocationError, JobId, KvStore};
use std::collections::BTreeMap;

// Gas schedule for scripted writes
pub const WRITE_COST_FLAT: u64 = 2_000;
pub const WRITE_COST_PER_BYTE: u64 = 30;

/// Runs each job's scripted steps in order on every invocation
#[derive(Debug, Default, Clone)]
pub struct ScriptedExecutor {
    scripts: BTreeMap<JobId, Vec<Step>>,
}

impl ScriptedExecutor {
    pub fn new(scripts: BTreeMap<JobId, Vec<Step>>) -> Self {
        Self { scripts }
    }

}

impl From<&Scenario> for ScriptedExecutor {
    fn from(scenario: &Scenario) -> Self {
        Self::new(
            scenario
                .jobs
                .iter()
                .map(|job| (job.job_id.clone(), job.steps.clone()))
                .collect(),
        )
    }
}

impl Executor for ScriptedExecutor {
    fn execute(
        &self,
        store: &mut dyn KvStore,
        meter: &mut GasMeter,
        job_id: &JobId,
        _msg: &[u8],
    ) -> Result<Vec<u8>, InvocationError> {
        let Some(steps) = self.scripts.get(job_id) else {
            return Err(InvocationError::Fault(format!("no contract code for {job_id}")));
        };

        for step in steps {
            match step {
                Step::Consume(amount) => meter.consume(*amount, "consume")?,
                Step::Write { key, value } => {
                    let bytes = (key.len() + value.len()) as u64;
                    meter.consume(
                        WRITE_COST_FLAT.saturating_add(WRITE_COST_PER_BYTE.saturating_mul(bytes)),
                        "write",
                    )?;
                    store.set(key.as_bytes(), value.as_bytes().to_vec());
                }
                Step::Fault(msg) => return Err(InvocationError::Fault(msg.clone())),
                Step::Panic(msg) => panic!("{msg}"),
                Step::Respond(body) => return Ok(body.as_bytes().to_vec()),
            }
        }

        Ok(Vec::new())
    }
}
