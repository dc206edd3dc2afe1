//! Schema module - Run configuration and reporting types.

mod config;
mod evolution;

pub use config::*;
pub use evolution::*;
