use blockclock_scheduler::{
    executor::contract_key,
    instructions::SchedulerInstruction,
    job::{JobEntry, JobId},
    params::{self, SchedulerParams},
    processors::{process_instruction, Signers},
    registry, Executor, GasMeter, InvocationError, KvStore, MemoryStore, Result,
};
use std::{cell::RefCell, collections::BTreeMap};

#[allow(dead_code)]
pub const AUTHORITY: &str = "blockclock-admin";

/// What a test job does when invoked
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Charge `gas`, bump `counter` in the job's namespace, return an empty response
    Succeed { gas: u64 },
    /// Charge `gas`, write, then fail
    Fault { gas: u64 },
    /// Write, then charge more than any sane budget
    Exhaust,
    /// Write, then panic
    Panic,
    /// Return a response that is not JSON
    Malformed,
}

/// Executor driven by a per-job behavior table. Jobs not in the table succeed
/// with one unit of gas.
#[derive(Default)]
pub struct TestExecutor {
    behaviors: BTreeMap<String, Behavior>,
    calls: RefCell<Vec<JobId>>,
}

#[allow(dead_code)]
impl TestExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, job_id: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(job_id.to_string(), behavior);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|id| id.to_string()).collect()
    }
}

/// Where a job's counter lands in the committed store
#[allow(dead_code)]
pub fn counter_key(job_id: &JobId) -> Vec<u8> {
    contract_key(job_id, b"counter")
}

fn bump(store: &mut dyn KvStore) {
    let next = store
        .get(b"counter")
        .map(|v| u64::from_le_bytes(v.try_into().unwrap()) + 1)
        .unwrap_or(1);
    store.set(b"counter", next.to_le_bytes().to_vec());
}

impl Executor for TestExecutor {
    fn execute(
        &self,
        store: &mut dyn KvStore,
        meter: &mut GasMeter,
        job_id: &JobId,
        msg: &[u8],
    ) -> std::result::Result<Vec<u8>, InvocationError> {
        assert_eq!(msg, br#"{"clock_end_block":{}}"#);
        self.calls.borrow_mut().push(job_id.clone());

        match self
            .behaviors
            .get(job_id.as_str())
            .cloned()
            .unwrap_or(Behavior::Succeed { gas: 1 })
        {
            Behavior::Succeed { gas } => {
                meter.consume(gas, "work")?;
                bump(store);
                Ok(Vec::new())
            }
            Behavior::Fault { gas } => {
                meter.consume(gas, "work")?;
                bump(store);
                Err(InvocationError::Fault("contract error".into()))
            }
            Behavior::Exhaust => {
                bump(store);
                meter.consume(u64::MAX, "infinite loop")?;
                Ok(Vec::new())
            }
            Behavior::Panic => {
                bump(store);
                panic!("job {job_id} aborted");
            }
            Behavior::Malformed => {
                bump(store);
                Ok(b"not json".to_vec())
            }
        }
    }
}

#[allow(dead_code)]
pub fn id(s: &str) -> JobId {
    s.parse().unwrap()
}

/// Store with params set (unless `budget` is `None`) and the given jobs
#[allow(dead_code)]
pub fn seeded_store(budget: Option<u64>, jobs: &[JobEntry]) -> MemoryStore {
    let mut store = MemoryStore::new();
    if let Some(budget) = budget {
        params::set(&mut store, &SchedulerParams::new(budget)).unwrap();
    }
    for entry in jobs {
        registry::put(&mut store, entry).unwrap();
    }
    store
}

#[allow(dead_code)]
pub fn execute_instruction(
    store: &mut MemoryStore,
    instruction: SchedulerInstruction,
    sender: &str,
) -> Result<()> {
    print!("➡️  Instruction: {instruction:?} ");

    let data = instruction.pack()?;
    let res = process_instruction(
        store,
        Signers {
            authority: AUTHORITY,
            sender,
        },
        &data,
    );

    match &res {
        Ok(()) => println!("✅"),
        Err(err) => println!("❌ {err}"),
    }
    res
}
