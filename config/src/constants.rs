// Environment names accepted on the command line
pub const ENV_MAINNET_BETA_NAME: &str = "mainnet-beta";
pub const ENV_MAINNET_BETA_SHORT_NAME: &str = "m";
pub const ENV_TESTNET_NAME: &str = "testnet";
pub const ENV_TESTNET_SHORT_NAME: &str = "t";
pub const ENV_DEVNET_NAME: &str = "devnet";
pub const ENV_DEVNET_SHORT_NAME: &str = "d";
pub const ENV_LOCALNET_NAME: &str = "local";
pub const ENV_LOCALNET_SHORT_NAME: &str = "l";

// Environment variables overriding the per-environment defaults
pub const ENV_VAR_PER_JOB_BUDGET: &str = "BLOCKCLOCK_PER_JOB_BUDGET";
pub const ENV_VAR_AUTHORITY: &str = "BLOCKCLOCK_AUTHORITY";

// Constants related to mainnet-beta configuration
pub const ENV_MAINNET_BETA_AUTHORITY: &str = "blockclock-gov-mainnet-beta";
pub const ENV_MAINNET_BETA_PER_JOB_BUDGET: u64 = 100_000;

// Constants related to testnet configuration
pub const ENV_TESTNET_AUTHORITY: &str = "blockclock-gov-testnet";
pub const ENV_TESTNET_PER_JOB_BUDGET: u64 = 100_000;

// Constants related to devnet configuration
pub const ENV_DEVNET_AUTHORITY: &str = "blockclock-gov-devnet";
pub const ENV_DEVNET_PER_JOB_BUDGET: u64 = 250_000;

// Constants related to localnet configuration
pub const ENV_LOCAL_AUTHORITY: &str = "blockclock-admin";
pub const ENV_LOCAL_PER_JOB_BUDGET: u64 = 1_000_000;
