//! Administrative instruction processors

pub mod register;
pub mod unquarantine;
pub mod unregister;
pub mod update_params;

use crate::{instructions::SchedulerInstruction, store::KvStore, Error, Result};
use register::process_register_job;
use unquarantine::process_unquarantine_job;
use unregister::process_unregister_job;
use update_params::process_update_params;

/// Who may run administrative instructions and who is running this one
#[derive(Debug, Clone, Copy)]
pub struct Signers<'a> {
    pub authority: &'a str,
    pub sender: &'a str,
}

impl Signers<'_> {
    pub fn check_authority(&self) -> Result<()> {
        if self.sender != self.authority {
            return Err(Error::Unauthorized(self.sender.to_string()));
        }
        Ok(())
    }
}

/// Decode and apply one administrative instruction.
///
/// Errors are returned to the caller and leave the store untouched.
pub fn process_instruction(
    store: &mut dyn KvStore,
    signers: Signers<'_>,
    instruction_data: &[u8],
) -> Result<()> {
    let instruction = SchedulerInstruction::unpack(instruction_data)?;

    tracing::debug!(sender = signers.sender, "Instruction: {:?}", instruction);

    match instruction {
        SchedulerInstruction::RegisterJob(value) => process_register_job(store, signers, &value)?,
        SchedulerInstruction::UnregisterJob(value) => {
            process_unregister_job(store, signers, &value)?
        }
        SchedulerInstruction::UnquarantineJob(value) => {
            process_unquarantine_job(store, signers, &value)?
        }
        SchedulerInstruction::UpdateParams(value) => {
            process_update_params(store, signers, &value)?
        }
    };

    Ok(())
}
