//! Genetic Images - evolve a grid of pixels toward a target image.
//!
//! Each candidate image is a flat, row-major list of quantized RGB pixels.
//! A generational genetic algorithm (tournament selection, two-point
//! crossover, channel-nudge mutation) minimizes the summed squared color
//! distance to the target.
//!
//! # Architecture
//!
//! - `schema`: Run configuration and reporting types
//! - `compute`: Quantization, fitness, variation operators and the engine
//! - `raster`: Target image decoding and snapshot encoding
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use genetic_images::{BitmapSnapshotWriter, EvolutionConfig, EvolutionEngine, TargetImage};
//!
//! let config = EvolutionConfig::default();
//! let target = Arc::new(TargetImage::load("target.png").unwrap());
//! let writer = BitmapSnapshotWriter::from_config(&config.snapshot);
//!
//! let mut engine = EvolutionEngine::new(config, target).with_snapshot_sink(Box::new(writer));
//! let result = engine.run().unwrap();
//!
//! println!("Stopped after {} generations", result.stats.generations);
//! ```

pub mod compute;
pub mod raster;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{EvolutionEngine, EvolutionError, EvolutionResult, Individual};
pub use raster::{BitmapSnapshotWriter, ImageError, TargetImage};
pub use schema::{EvolutionConfig, GenerationStats, StopReason};
