use crate::{
    executor::ScriptedExecutor,
    scenario::{Action, Scenario},
};
use blockclock_config::SchedulerConfig;
use blockclock_scheduler::{
    genesis::init_genesis,
    processors::{process_instruction, Signers},
    query, CacheStore, JobEntry, JobId, JobStatus, MemoryStore, Scheduler, SchedulerParams,
    TickReport, TickStatus,
};
use clap::Args;
use serde::Serialize;
use std::{io::Write, path::PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct RunCliCommand {
    /// Path to the scenario file
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,
    /// Number of blocks to run, overriding the scenario
    #[arg(long, value_name = "N")]
    pub blocks: Option<u64>,
    /// Output as pretty JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
    /// Output as compact JSON
    #[arg(long, default_value_t = false)]
    pub json_compact: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectedAction {
    pub height: u64,
    pub action: Action,
    pub error: String,
}

/// Committed state after the last block plus every block's report
#[derive(Debug, Clone, Serialize)]
pub struct Simulation {
    pub params: SchedulerParams,
    pub active_jobs: Vec<JobId>,
    pub jobs: Vec<JobEntry>,
    pub blocks: Vec<TickReport>,
    pub rejected_actions: Vec<RejectedAction>,
}

#[derive(Tabled)]
struct BlockDisplay {
    height: u64,
    status: String,
    invoked: usize,
    failures: String,
    gas_used: u64,
}

#[derive(Tabled)]
struct JobDisplay {
    job_id: JobId,
    status: JobStatus,
}

/// Replay `blocks` blocks. Each block's actions and pass run in one branch
/// that is committed when the block ends.
pub fn simulate(
    scenario: &Scenario,
    config: &SchedulerConfig,
    blocks: u64,
) -> eyre::Result<Simulation> {
    let mut store = MemoryStore::new();
    init_genesis(&mut store, &scenario.genesis(config.params())?)?;

    let scheduler = Scheduler::new(ScriptedExecutor::from(scenario));

    let mut reports = Vec::new();
    let mut rejected_actions = Vec::new();

    for height in 1..=blocks {
        let mut block = CacheStore::new(&mut store);

        for action in scenario.actions_at(height) {
            let signers = Signers {
                authority: &config.authority,
                sender: action.sender.as_deref().unwrap_or(&config.authority),
            };
            let data = action.action.instruction().pack()?;
            if let Err(err) = process_instruction(&mut block, signers, &data) {
                warn!(height, "Rejected {:?}: {}", action.action, err);
                rejected_actions.push(RejectedAction {
                    height,
                    action: action.action.clone(),
                    error: err.to_string(),
                });
            }
        }

        reports.push(scheduler.end_block(&mut block, height));
        block.commit();
    }

    info!(blocks, "Simulation finished");

    Ok(Simulation {
        params: query::params(&store)?.params,
        active_jobs: query::active_jobs(&store)?.job_ids,
        jobs: query::jobs(&store, true)?.jobs,
        blocks: reports,
        rejected_actions,
    })
}

impl RunCliCommand {
    pub fn execute<W: Write>(self, config: &SchedulerConfig, out: &mut W) -> eyre::Result<()> {
        let scenario = Scenario::load(&self.scenario)?;
        let blocks = self.blocks.unwrap_or(scenario.blocks);

        let simulation = simulate(&scenario, config, blocks)?;

        let res = if self.json {
            serde_json::to_string_pretty(&simulation)?
        } else if self.json_compact {
            serde_json::to_string(&simulation)?
        } else {
            render_tables(&simulation)
        };

        writeln!(out, "{res}")?;

        Ok(())
    }
}

fn render_tables(simulation: &Simulation) -> String {
    let block_displays: Vec<BlockDisplay> = simulation
        .blocks
        .iter()
        .map(|report| BlockDisplay {
            height: report.height,
            status: match &report.status {
                TickStatus::Completed => "completed".to_string(),
                TickStatus::Skipped(reason) => format!("skipped ({reason})"),
            },
            invoked: report.invoked.len(),
            failures: if report.failures.is_empty() {
                "-".to_string()
            } else {
                report
                    .failures
                    .iter()
                    .map(|f| format!("{}:{}", f.job_id, f.reason))
                    .collect::<Vec<_>>()
                    .join(", ")
            },
            gas_used: report.gas_used,
        })
        .collect();

    let job_displays: Vec<JobDisplay> = simulation
        .jobs
        .iter()
        .map(|entry| JobDisplay {
            job_id: entry.job_id.clone(),
            status: entry.status,
        })
        .collect();

    let mut res = Table::new(block_displays)
        .with(Style::psql().remove_horizontals())
        .to_string();
    res.push_str("\n\n");
    res.push_str(
        &Table::new(job_displays)
            .with(Style::psql().remove_horizontals())
            .to_string(),
    );

    for rejected in &simulation.rejected_actions {
        res.push_str(&format!(
            "\nrejected at {}: {:?}: {}",
            rejected.height, rejected.action, rejected.error
        ));
    }

    res
}
