pub mod constants;
pub mod env;

pub use env::{Environment, SchedulerConfig};
