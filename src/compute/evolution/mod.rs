//! Evolutionary search toward a target image.
//!
//! # Overview
//!
//! - **Genomes** (`genome`): individuals, random generation, crossover and mutation
//! - **Fitness** (`fitness`): squared color distance to the quantized target
//! - **Selection** (`selection`): tournament selection
//! - **Search** (`search`): the generation loop and its termination rules
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use genetic_images::compute::evolution::EvolutionEngine;
//! use genetic_images::raster::TargetImage;
//! use genetic_images::schema::EvolutionConfig;
//!
//! let target = Arc::new(TargetImage::load("target.png").unwrap());
//! let mut engine = EvolutionEngine::new(EvolutionConfig::default(), target);
//! let result = engine
//!     .run_with_callback(|stats| {
//!         println!("Generation {}: best fitness = {}", stats.generation, stats.min);
//!     })
//!     .unwrap();
//!
//! println!("Best fitness: {:?}", result.best.fitness());
//! ```

mod error;
mod fitness;
mod genome;
mod search;
mod selection;

pub use error::EvolutionError;
pub use fitness::{FitnessEvaluator, squared_color_distance};
pub use genome::{GenomeRng, Individual, Pixel};
pub use search::{EvolutionEngine, EvolutionResult};
pub use selection::{select_tournament, tournament_index};
