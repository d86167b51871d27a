use crate::{
    processors::{
        register::RegisterJobArgs, unquarantine::UnquarantineJobArgs,
        unregister::UnregisterJobArgs, update_params::UpdateParamsArgs,
    },
    Error, Result,
};
use borsh::{BorshDeserialize, BorshSerialize};
use std::fmt;

/// Administrative instructions. The first byte of the packed form is the variant.
#[derive(BorshSerialize, BorshDeserialize, PartialEq, Clone)]
pub enum SchedulerInstruction {
    RegisterJob(RegisterJobArgs),         // variant 0
    UnregisterJob(UnregisterJobArgs),     // variant 1
    UnquarantineJob(UnquarantineJobArgs), // variant 2
    UpdateParams(UpdateParamsArgs),       // variant 3
}

impl SchedulerInstruction {
    pub fn get_name(&self) -> String {
        match self {
            Self::RegisterJob(_) => "RegisterJob".to_string(),
            Self::UnregisterJob(_) => "UnregisterJob".to_string(),
            Self::UnquarantineJob(_) => "UnquarantineJob".to_string(),
            Self::UpdateParams(_) => "UpdateParams".to_string(),
        }
    }

    pub fn get_args(&self) -> String {
        match self {
            Self::RegisterJob(args) => format!("{args:?}"),
            Self::UnregisterJob(args) => format!("{args:?}"),
            Self::UnquarantineJob(args) => format!("{args:?}"),
            Self::UpdateParams(args) => format!("{args:?}"),
        }
    }

    pub fn pack(&self) -> Result<Vec<u8>> {
        Ok(borsh::to_vec(self)?)
    }

    #[rustfmt::skip]
    pub fn unpack(input: &[u8]) -> Result<Self> {
        let (&instruction, rest) = input.split_first().ok_or(Error::InvalidInstruction)?;

        match instruction {
            0 => Ok(Self::RegisterJob(from_slice::<RegisterJobArgs>(rest)?)),
            1 => Ok(Self::UnregisterJob(from_slice::<UnregisterJobArgs>(rest)?)),
            2 => Ok(Self::UnquarantineJob(from_slice::<UnquarantineJobArgs>(rest)?)),
            3 => Ok(Self::UpdateParams(from_slice::<UpdateParamsArgs>(rest)?)),
            _ => Err(Error::InvalidInstruction),
        }
    }
}

impl fmt::Debug for SchedulerInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.get_name(), self.get_args())
    }
}

fn from_slice<T: BorshDeserialize>(data: &[u8]) -> Result<T> {
    borsh::from_slice(data).map_err(|_| Error::InvalidInstruction)
}
