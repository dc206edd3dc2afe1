//! Compute module - Quantization and the evolutionary search.

pub mod evolution;
mod quantize;

pub use quantize::*;
