//! Configuration types for an evolution run.
//!
//! Every field carries a serde default so partial JSON files are accepted;
//! the defaults are the tuned constants of the classic run (population of
//! 100, 20% crossover, 50% mutation, tournaments of 3).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration for an evolution run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Population and termination settings.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Crossover and mutation settings.
    #[serde(default)]
    pub variation: VariationConfig,
    /// Parent selection settings.
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Snapshot output settings.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

/// Population size and stopping conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of individuals, constant for the whole run.
    #[serde(default = "default_population_size")]
    pub size: usize,
    /// Generation cap.
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    /// Stop once the tracked fitness drops to or below this value.
    /// `None` runs until the generation cap.
    #[serde(default = "default_target_fitness")]
    pub target_fitness: Option<u64>,
    /// Which population fitness is compared against `target_fitness`.
    #[serde(default)]
    pub termination: TerminationMetric,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            max_generations: default_max_generations(),
            target_fitness: default_target_fitness(),
            termination: TerminationMetric::default(),
        }
    }
}

fn default_population_size() -> usize {
    100
}
fn default_max_generations() -> usize {
    100_000
}
fn default_target_fitness() -> Option<u64> {
    Some(10_000)
}

/// Population fitness used by the termination check.
///
/// Fitness is a distance, so the best individual holds the *minimum*.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TerminationMetric {
    /// Stop when the best (lowest) fitness meets the target.
    #[default]
    Best,
    /// Stop when the worst (highest) fitness meets the target, i.e. the whole
    /// population is within the threshold.
    Worst,
}

/// Crossover and mutation probabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariationConfig {
    /// Probability that an adjacent offspring pair is crossed over.
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    /// Probability that an offspring enters the mutation pass.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Per-pixel mutation probability inside the mutation pass.
    #[serde(default = "default_gene_mutation_rate")]
    pub gene_mutation_rate: f64,
    /// Magnitude of a channel nudge.
    #[serde(default = "default_mutation_step")]
    pub mutation_step: i32,
    /// Clamp mutated channels into `[0, 255]`.
    ///
    /// Clamped channels are not re-quantized, so a 255 nudged down lands on
    /// 245, just off the quantization grid.
    #[serde(default = "default_clamp_channels")]
    pub clamp_channels: bool,
}

impl Default for VariationConfig {
    fn default() -> Self {
        Self {
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_mutation_rate(),
            gene_mutation_rate: default_gene_mutation_rate(),
            mutation_step: default_mutation_step(),
            clamp_channels: default_clamp_channels(),
        }
    }
}

fn default_crossover_rate() -> f64 {
    0.2
}
fn default_mutation_rate() -> f64 {
    0.5
}
fn default_gene_mutation_rate() -> f64 {
    0.5
}
fn default_mutation_step() -> i32 {
    10
}
fn default_clamp_channels() -> bool {
    true
}

/// Tournament selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Contestants drawn (with replacement) per tournament.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            tournament_size: default_tournament_size(),
        }
    }
}

fn default_tournament_size() -> usize {
    3
}

/// Where and how often the best individual is written out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Write a snapshot every N generations (0 disables).
    #[serde(default = "default_snapshot_interval")]
    pub interval: usize,
    /// Directory the snapshots are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// File name prefix, followed by the generation number.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Also write the best individual once the run terminates.
    #[serde(default = "default_save_final")]
    pub save_final: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            interval: default_snapshot_interval(),
            output_dir: default_output_dir(),
            prefix: default_prefix(),
            save_final: default_save_final(),
        }
    }
}

fn default_snapshot_interval() -> usize {
    1000
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_prefix() -> String {
    "out".to_string()
}
fn default_save_final() -> bool {
    true
}

impl EvolutionConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population.size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.selection.tournament_size == 0 {
            return Err(ConfigError::EmptyTournament);
        }

        let check_probability = |value: f64, name: &'static str| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::InvalidProbability { name, value })
            }
        };

        check_probability(self.variation.crossover_rate, "crossover_rate")?;
        check_probability(self.variation.mutation_rate, "mutation_rate")?;
        check_probability(self.variation.gene_mutation_rate, "gene_mutation_rate")?;

        if self.variation.mutation_step <= 0 {
            let step = self.variation.mutation_step;
            return Err(ConfigError::InvalidMutationStep(step));
        }

        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("Tournament size must be non-zero")]
    EmptyTournament,
    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Mutation step must be positive, got {0}")]
    InvalidMutationStep(i32),
}
