pub mod run;
pub mod validate;

use clap::Subcommand;
use run::RunCliCommand;
use validate::ValidateCliCommand;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a scenario for a number of blocks and print the resulting registry
    Run(RunCliCommand),
    /// Check that a scenario parses and would produce a valid genesis
    Validate(ValidateCliCommand),
}
