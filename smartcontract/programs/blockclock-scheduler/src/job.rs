//! Registered jobs and their lifecycle status

use crate::{Error, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const MAX_JOB_ID_LENGTH: usize = 64;

/// Address-like job identifier. Ordering is byte-wise, which fixes the
/// execution order of a pass.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct JobId(String);

impl BorshDeserialize for JobId {
    fn deserialize_reader<R: borsh::io::Read>(reader: &mut R) -> borsh::io::Result<Self> {
        let id = String::deserialize_reader(reader)?;
        Self::new(id).map_err(|err| {
            borsh::io::Error::new(borsh::io::ErrorKind::InvalidData, err.to_string())
        })
    }
}

impl JobId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        validate_job_id(&id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for JobId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for JobId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<JobId> for String {
    fn from(id: JobId) -> Self {
        id.0
    }
}

/// Validates job ID format and length
pub fn validate_job_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidJobId("Job ID cannot be empty".into()));
    }

    if id.len() > MAX_JOB_ID_LENGTH {
        return Err(Error::InvalidJobId(format!(
            "Job ID '{}' exceeds maximum length of {} bytes",
            id, MAX_JOB_ID_LENGTH
        )));
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(Error::InvalidJobId(format!(
            "Job ID '{}' contains invalid characters. Use only alphanumeric, '_', '-' and '.'",
            id
        )));
    }

    Ok(())
}

#[repr(u8)]
#[derive(
    BorshSerialize, BorshDeserialize, Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq,
)]
#[borsh(use_discriminant = true)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Active = 1,
    Quarantined = 2,
}

impl JobStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Active)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Active => write!(f, "active"),
            JobStatus::Quarantined => write!(f, "quarantined"),
        }
    }
}

/// Registry record for one job
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JobEntry {
    pub job_id: JobId,
    pub status: JobStatus,
}

impl JobEntry {
    /// Newly registered jobs start out active
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            status: JobStatus::Active,
        }
    }

    pub fn quarantined(mut self) -> Self {
        self.status = JobStatus::Quarantined;
        self
    }
}

impl fmt::Display for JobEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job_id: {}, status: {}", self.job_id, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_validation() {
        assert!(validate_job_id("valid_job_123").is_ok());
        assert!(validate_job_id("valid-job-123").is_ok());
        assert!(validate_job_id("juno1abc.clock").is_ok());
        assert!(validate_job_id("").is_err());
        assert!(validate_job_id(&"a".repeat(65)).is_err());
        assert!(validate_job_id("invalid job!").is_err());
        assert!(validate_job_id("invalid@job").is_err());
    }

    #[test]
    fn test_job_id_borsh_decode_validates() {
        let id: JobId = "job-a".parse().unwrap();
        let data = borsh::to_vec(&id).unwrap();
        assert_eq!(JobId::try_from_slice(&data).unwrap(), id);

        let data = borsh::to_vec(&"bad id!".to_string()).unwrap();
        assert!(JobId::try_from_slice(&data).is_err());

        let data = borsh::to_vec(&String::new()).unwrap();
        assert!(JobId::try_from_slice(&data).is_err());
    }

    #[test]
    fn test_job_id_ordering_is_bytewise() {
        let mut ids: Vec<JobId> = ["b", "A", "a", "B1", "B"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        ids.sort();
        let ids: Vec<&str> = ids.iter().map(JobId::as_str).collect();
        assert_eq!(ids, vec!["A", "B", "B1", "a", "b"]);
    }

    #[test]
    fn test_job_id_serde_rejects_invalid() {
        let id: JobId = serde_json::from_str("\"job-1\"").unwrap();
        assert_eq!(id.as_str(), "job-1");
        assert!(serde_json::from_str::<JobId>("\"bad id\"").is_err());
    }

    #[test]
    fn test_state_job_entry_serialization() {
        let val = JobEntry::new("job-1".parse().unwrap()).quarantined();

        let data = borsh::to_vec(&val).unwrap();
        let val2 = JobEntry::try_from_slice(&data).unwrap();

        assert_eq!(val, val2);
        assert_eq!(*data.last().unwrap(), JobStatus::Quarantined as u8);
    }
}
