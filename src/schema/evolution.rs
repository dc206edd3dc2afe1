//! Progress and result types reported by the evolution engine.

use serde::{Deserialize, Serialize};

/// Fitness summary of one generation's population.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GenerationStats {
    /// Generation the statistics were taken at (0 = initial population).
    pub generation: usize,
    /// Best (lowest) fitness.
    pub min: u64,
    /// Worst (highest) fitness.
    pub max: u64,
    /// Mean fitness.
    pub mean: f64,
    /// Population standard deviation of fitness.
    pub std: f64,
}

impl GenerationStats {
    /// Summarize a set of fitness values.
    pub fn from_fitnesses(generation: usize, fitnesses: &[u64]) -> Self {
        if fitnesses.is_empty() {
            return Self {
                generation,
                min: 0,
                max: 0,
                mean: 0.0,
                std: 0.0,
            };
        }

        let n = fitnesses.len() as f64;
        let min = fitnesses.iter().copied().min().unwrap_or(0);
        let max = fitnesses.iter().copied().max().unwrap_or(0);
        let mean = fitnesses.iter().map(|&f| f as f64).sum::<f64>() / n;
        let variance = fitnesses
            .iter()
            .map(|&f| (f as f64 - mean).powi(2))
            .sum::<f64>()
            / n;

        Self {
            generation,
            min,
            max,
            mean,
            std: variance.sqrt(),
        }
    }
}

/// Per-generation statistics collected over a run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EvolutionHistory {
    pub generations: Vec<GenerationStats>,
}

impl EvolutionHistory {
    pub fn push(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    pub fn last(&self) -> Option<&GenerationStats> {
        self.generations.last()
    }

    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Best fitness per generation, for plotting.
    pub fn best_fitness(&self) -> Vec<u64> {
        self.generations.iter().map(|s| s.min).collect()
    }
}

/// Current phase of the generation loop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EvolutionPhase {
    /// Building the random population.
    #[default]
    Initializing,
    /// Evaluating the initial population.
    Evaluating,
    /// Running tournaments.
    Selecting,
    /// Applying crossover and mutation.
    Varying,
    /// Evaluating offspring with a stale fitness.
    Reevaluating,
    /// Summarizing and writing snapshots.
    Reporting,
    /// Run finished.
    Terminated,
}

/// Reason evolution stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Tracked fitness reached the target.
    TargetReached,
    /// Reached the generation cap.
    MaxGenerations,
}

/// Statistics from a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Total generations run.
    pub generations: usize,
    /// Total fitness evaluations performed.
    pub total_evaluations: u64,
    /// Snapshots successfully written.
    pub snapshots_written: usize,
    /// Statistics of the final population.
    pub final_stats: GenerationStats,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Evaluations per second.
    pub evaluations_per_second: f64,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}
