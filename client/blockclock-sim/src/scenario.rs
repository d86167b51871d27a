use blockclock_scheduler::{
    instructions::SchedulerInstruction,
    processors::{
        register::RegisterJobArgs, unquarantine::UnquarantineJobArgs,
        unregister::UnregisterJobArgs, update_params::UpdateParamsArgs,
    },
    GenesisState, JobEntry, JobId, JobStatus, SchedulerParams,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fs, path::Path};

/// One scripted unit of work performed by a job on every invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Charge gas without touching state
    Consume(u64),
    /// Write a key in the job's own namespace
    Write { key: String, value: String },
    /// Return an execution error
    Fault(String),
    /// Abort the invocation by panicking
    Panic(String),
    /// Stop and return this response body
    Respond(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioJob {
    pub job_id: JobId,
    #[serde(default = "default_status")]
    pub status: JobStatus,
    /// Left out of genesis; expected to be registered by an action
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_status() -> JobStatus {
    JobStatus::Active
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    RegisterJob(JobId),
    UnregisterJob(JobId),
    UnquarantineJob(JobId),
    UpdateParams(SchedulerParams),
}

impl Action {
    pub fn instruction(&self) -> SchedulerInstruction {
        match self {
            Action::RegisterJob(job_id) => SchedulerInstruction::RegisterJob(RegisterJobArgs {
                job_id: job_id.clone(),
            }),
            Action::UnregisterJob(job_id) => {
                SchedulerInstruction::UnregisterJob(UnregisterJobArgs {
                    job_id: job_id.clone(),
                })
            }
            Action::UnquarantineJob(job_id) => {
                SchedulerInstruction::UnquarantineJob(UnquarantineJobArgs {
                    job_id: job_id.clone(),
                })
            }
            Action::UpdateParams(params) => SchedulerInstruction::UpdateParams(UpdateParamsArgs {
                params: params.clone(),
            }),
        }
    }
}

/// Administrative action applied at the start of block `height`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioAction {
    pub height: u64,
    /// Defaults to the environment's authority
    #[serde(default)]
    pub sender: Option<String>,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Falls back to the environment's default budget
    #[serde(default)]
    pub params: Option<SchedulerParams>,
    #[serde(default)]
    pub jobs: Vec<ScenarioJob>,
    #[serde(default)]
    pub actions: Vec<ScenarioAction>,
    #[serde(default = "default_blocks")]
    pub blocks: u64,
}

fn default_blocks() -> u64 {
    1
}

impl Scenario {
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let data = fs::read_to_string(path)
            .map_err(|err| eyre::eyre!("Unable to read {}: {err}", path.display()))?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> eyre::Result<Self> {
        let scenario: Scenario = serde_json::from_str(data)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> eyre::Result<()> {
        let mut seen = BTreeSet::new();
        for job in &self.jobs {
            if !seen.insert(&job.job_id) {
                return Err(eyre::eyre!("Job {} is defined more than once", job.job_id));
            }
        }

        for action in &self.actions {
            if action.height == 0 {
                return Err(eyre::eyre!("Action heights start at 1"));
            }
        }

        if let Some(params) = &self.params {
            params.validate()?;
        }

        Ok(())
    }

    /// Genesis holding every non-pending job
    pub fn genesis(&self, default_params: SchedulerParams) -> eyre::Result<GenesisState> {
        let jobs = self
            .jobs
            .iter()
            .filter(|job| !job.pending)
            .map(|job| JobEntry {
                job_id: job.job_id.clone(),
                status: job.status,
            })
            .collect();

        let genesis = GenesisState::new(self.params.clone().unwrap_or(default_params), jobs);
        genesis.validate()?;
        Ok(genesis)
    }

    pub fn actions_at(&self, height: u64) -> impl Iterator<Item = &ScenarioAction> {
        self.actions.iter().filter(move |a| a.height == height)
    }
}
