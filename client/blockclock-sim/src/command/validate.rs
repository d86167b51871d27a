use crate::scenario::Scenario;
use blockclock_config::SchedulerConfig;
use clap::Args;
use std::{io::Write, path::PathBuf};

#[derive(Args, Debug)]
pub struct ValidateCliCommand {
    /// Path to the scenario file
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,
}

impl ValidateCliCommand {
    pub fn execute<W: Write>(self, config: &SchedulerConfig, out: &mut W) -> eyre::Result<()> {
        let scenario = Scenario::load(&self.scenario)?;
        let genesis = scenario.genesis(config.params())?;

        writeln!(
            out,
            "Scenario is valid: {} genesis jobs, {} actions, {} blocks, {}",
            genesis.jobs.len(),
            scenario.actions.len(),
            scenario.blocks,
            genesis.params
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SchedulerConfig {
        SchedulerConfig {
            authority: "admin".to_string(),
            default_per_job_budget: 500,
        }
    }

    #[test]
    fn test_validate_scenario() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"jobs":[{{"job_id":"job-a"}}],"blocks":4}}"#).unwrap();

        let mut output = Vec::new();
        ValidateCliCommand {
            scenario: file.path().to_path_buf(),
        }
        .execute(&config(), &mut output)
        .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Scenario is valid: 1 genesis jobs, 0 actions, 4 blocks, per_job_budget: 500\n"
        );
    }

    #[test]
    fn test_validate_missing_file() {
        let mut output = Vec::new();
        let res = ValidateCliCommand {
            scenario: PathBuf::from("/nonexistent/scenario.json"),
        }
        .execute(&config(), &mut output);
        assert!(res.is_err());
        assert!(output.is_empty());
    }
}
