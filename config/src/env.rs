use blockclock_scheduler::SchedulerParams;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Environment {
    MainnetBeta,
    Testnet,
    #[default]
    Devnet,
    Local,
}

impl std::str::FromStr for Environment {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ENV_MAINNET_BETA_SHORT_NAME | ENV_MAINNET_BETA_NAME => Ok(Environment::MainnetBeta),
            ENV_TESTNET_SHORT_NAME | ENV_TESTNET_NAME => Ok(Environment::Testnet),
            ENV_DEVNET_SHORT_NAME | ENV_DEVNET_NAME => Ok(Environment::Devnet),
            ENV_LOCALNET_SHORT_NAME | ENV_LOCALNET_NAME => Ok(Environment::Local),
            _ => Err(eyre::eyre!(
                "Invalid environment {s}, must be one of: {ENV_MAINNET_BETA_NAME}, {ENV_TESTNET_NAME}, {ENV_DEVNET_NAME}, {ENV_LOCALNET_NAME}",
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::MainnetBeta => write!(f, "{ENV_MAINNET_BETA_NAME}"),
            Environment::Testnet => write!(f, "{ENV_TESTNET_NAME}"),
            Environment::Devnet => write!(f, "{ENV_DEVNET_NAME}"),
            Environment::Local => write!(f, "{ENV_LOCALNET_NAME}"),
        }
    }
}

impl Environment {
    /// Defaults for this environment with `BLOCKCLOCK_*` overrides applied
    pub fn config(&self) -> eyre::Result<SchedulerConfig> {
        let mut config = match self {
            Environment::MainnetBeta => SchedulerConfig {
                authority: ENV_MAINNET_BETA_AUTHORITY.to_string(),
                default_per_job_budget: ENV_MAINNET_BETA_PER_JOB_BUDGET,
            },
            Environment::Testnet => SchedulerConfig {
                authority: ENV_TESTNET_AUTHORITY.to_string(),
                default_per_job_budget: ENV_TESTNET_PER_JOB_BUDGET,
            },
            Environment::Devnet => SchedulerConfig {
                authority: ENV_DEVNET_AUTHORITY.to_string(),
                default_per_job_budget: ENV_DEVNET_PER_JOB_BUDGET,
            },
            Environment::Local => SchedulerConfig {
                authority: ENV_LOCAL_AUTHORITY.to_string(),
                default_per_job_budget: ENV_LOCAL_PER_JOB_BUDGET,
            },
        };

        if let Ok(value) = std::env::var(ENV_VAR_PER_JOB_BUDGET) {
            config.default_per_job_budget = value.parse::<u64>().map_err(|err| {
                eyre::eyre!("Invalid {ENV_VAR_PER_JOB_BUDGET} value {value:?}: {err}")
            })?;
        }
        if let Ok(value) = std::env::var(ENV_VAR_AUTHORITY) {
            if value.trim().is_empty() {
                return Err(eyre::eyre!("{ENV_VAR_AUTHORITY} cannot be empty"));
            }
            config.authority = value;
        }

        config.params().validate()?;

        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Sender allowed to run administrative instructions
    pub authority: String,
    /// Budget written to genesis when the scenario does not set one
    pub default_per_job_budget: u64,
}

impl SchedulerConfig {
    pub fn params(&self) -> SchedulerParams {
        SchedulerParams::new(self.default_per_job_budget)
    }
}
