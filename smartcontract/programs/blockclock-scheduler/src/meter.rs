//! Deterministic gas accounting for a single job invocation

use std::fmt;

/// Raised when a charge would take consumption past the limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfGas {
    pub descriptor: String,
    pub limit: u64,
}

impl fmt::Display for OutOfGas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "out of gas in {} (limit {})", self.descriptor, self.limit)
    }
}

impl std::error::Error for OutOfGas {}

/// Gas meter with a hard limit. Once exhausted it stays pinned at the limit.
#[derive(Debug, Clone)]
pub struct GasMeter {
    limit: u64,
    consumed: u64,
    exceeded: bool,
}

impl GasMeter {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            consumed: 0,
            exceeded: false,
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.consumed)
    }

    pub fn is_exhausted(&self) -> bool {
        self.consumed >= self.limit
    }

    /// True once any charge has been refused, even if the caller swallowed the error
    pub fn exceeded(&self) -> bool {
        self.exceeded
    }

    /// Charge `amount` units. On failure the meter reads as fully consumed.
    pub fn consume(&mut self, amount: u64, descriptor: &str) -> Result<(), OutOfGas> {
        match self.consumed.checked_add(amount) {
            Some(total) if total <= self.limit => {
                self.consumed = total;
                Ok(())
            }
            _ => {
                self.consumed = self.limit;
                self.exceeded = true;
                Err(OutOfGas {
                    descriptor: descriptor.to_string(),
                    limit: self.limit,
                })
            }
        }
    }
}
