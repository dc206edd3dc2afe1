//! Generational evolution loop.

use std::sync::Arc;
use std::time::Instant;

use crate::raster::{SnapshotSink, SnapshotTag, TargetImage};
use crate::schema::{
    EvolutionConfig, EvolutionHistory, EvolutionPhase, GenerationStats, RunStats, StopReason,
    TerminationMetric,
};

use super::error::EvolutionError;
use super::fitness::FitnessEvaluator;
use super::genome::{GenomeRng, Individual};
use super::selection::select_tournament;

/// Final result of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Best (lowest-fitness) individual of the final population.
    pub best: Individual,
    /// Statistics from the run.
    pub stats: RunStats,
    /// Full history for analysis.
    pub history: EvolutionHistory,
}

/// Evolution engine that owns the population and runs the generation loop.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    rng: GenomeRng,
    evaluator: FitnessEvaluator,
    population: Vec<Individual>,
    history: EvolutionHistory,
    generation: usize,
    phase: EvolutionPhase,
    evaluations: u64,
    snapshots_written: usize,
    snapshot_sink: Option<Box<dyn SnapshotSink>>,
}

impl EvolutionEngine {
    /// Create a new evolution engine.
    pub fn new(config: EvolutionConfig, target: Arc<TargetImage>) -> Self {
        let rng = match config.random_seed {
            Some(seed) => GenomeRng::new(seed),
            None => GenomeRng::random(),
        };

        Self {
            config,
            rng,
            evaluator: FitnessEvaluator::new(target),
            population: Vec::new(),
            history: EvolutionHistory::default(),
            generation: 0,
            phase: EvolutionPhase::Initializing,
            evaluations: 0,
            snapshots_written: 0,
            snapshot_sink: None,
        }
    }

    /// Hand periodic snapshots of the best individual to `sink`.
    pub fn with_snapshot_sink(mut self, sink: Box<dyn SnapshotSink>) -> Self {
        self.snapshot_sink = Some(sink);
        self
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    pub fn history(&self) -> &EvolutionHistory {
        &self.history
    }

    /// Replace the population with fresh random individuals.
    pub fn initialize(&mut self) {
        self.phase = EvolutionPhase::Initializing;
        self.generation = 0;
        self.evaluations = 0;
        self.snapshots_written = 0;
        self.history = EvolutionHistory::default();
        self.population = self.rng.random_population(
            self.config.population.size,
            self.evaluator.width(),
            self.evaluator.height(),
        );
    }

    /// Evaluate every individual without a valid fitness.
    fn evaluate_population(&mut self) -> Result<(), EvolutionError> {
        for individual in self.population.iter_mut().filter(|i| !i.is_evaluated()) {
            self.evaluator.evaluate(individual)?;
            self.evaluations += 1;
        }
        Ok(())
    }

    /// Cross adjacent offspring pairs, then mutate.
    fn vary(&mut self, offspring: &mut [Individual]) -> Result<(), EvolutionError> {
        let variation = &self.config.variation;

        // An odd trailing individual has no partner.
        let mut i = 0;
        while i + 1 < offspring.len() {
            if self.rng.chance(variation.crossover_rate) {
                let (left, right) = offspring.split_at_mut(i + 1);
                self.rng.crossover_two_point(&mut left[i], &mut right[0])?;
            }
            i += 2;
        }

        for mutant in offspring.iter_mut() {
            if self.rng.chance(variation.mutation_rate) {
                self.rng.mutate(
                    mutant,
                    variation.gene_mutation_rate,
                    variation.mutation_step,
                    variation.clamp_channels,
                );
            }
        }

        Ok(())
    }

    /// Run one generation: select, vary, re-evaluate, report.
    pub fn step(&mut self) -> Result<GenerationStats, EvolutionError> {
        self.config.validate()?;
        if self.population.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }
        self.generation += 1;

        self.phase = EvolutionPhase::Selecting;
        let mut offspring = select_tournament(
            &self.population,
            self.config.population.size,
            self.config.selection.tournament_size,
            &mut self.rng,
        )?;

        self.phase = EvolutionPhase::Varying;
        self.vary(&mut offspring)?;

        self.phase = EvolutionPhase::Reevaluating;
        self.population = offspring;
        self.evaluate_population()?;

        self.phase = EvolutionPhase::Reporting;
        let stats = self.record_stats();
        self.maybe_snapshot();
        Ok(stats)
    }

    /// Summarize the current population and append it to the history.
    fn record_stats(&mut self) -> GenerationStats {
        let fitnesses: Vec<u64> = self
            .population
            .iter()
            .filter_map(Individual::fitness)
            .collect();
        let stats = GenerationStats::from_fitnesses(self.generation, &fitnesses);

        log::debug!(
            "Generation {}: min={} max={} avg={:.1} std={:.1}",
            stats.generation,
            stats.min,
            stats.max,
            stats.mean,
            stats.std
        );

        self.history.push(stats);
        stats
    }

    /// Best (lowest-fitness) evaluated individual.
    pub fn best(&self) -> Option<&Individual> {
        self.population
            .iter()
            .filter(|i| i.is_evaluated())
            .min_by_key(|i| i.fitness())
    }

    /// Whether this generation is due a snapshot (never generation 0).
    pub fn is_snapshot_generation(&self, generation: usize) -> bool {
        let interval = self.config.snapshot.interval;
        interval > 0 && generation > 0 && generation % interval == 0
    }

    fn maybe_snapshot(&mut self) {
        if !self.is_snapshot_generation(self.generation) {
            return;
        }
        let Some(sink) = self.snapshot_sink.as_mut() else {
            return;
        };
        let Some(best) = self
            .population
            .iter()
            .filter(|i| i.is_evaluated())
            .min_by_key(|i| i.fitness())
        else {
            return;
        };

        let tag = SnapshotTag::Generation(self.generation);
        match sink.write_snapshot(tag, best, self.evaluator.width(), self.evaluator.height()) {
            Ok(path) => {
                self.snapshots_written += 1;
                log::info!(
                    "Generation {}: wrote best individual (fitness {:?}) to {}",
                    self.generation,
                    best.fitness(),
                    path.display()
                );
            }
            Err(e) => log::warn!("Generation {}: snapshot failed: {}", self.generation, e),
        }
    }

    /// Check if evolution should stop.
    fn should_stop(&self, stats: &GenerationStats) -> Option<StopReason> {
        if let Some(target) = self.config.population.target_fitness {
            let tracked = match self.config.population.termination {
                TerminationMetric::Best => stats.min,
                TerminationMetric::Worst => stats.max,
            };
            if tracked <= target {
                return Some(StopReason::TargetReached);
            }
        }

        if self.generation >= self.config.population.max_generations {
            return Some(StopReason::MaxGenerations);
        }

        None
    }

    /// Run evolution, calling `callback` with the statistics of every
    /// generation (including the initial population at generation 0).
    pub fn run_with_callback<F>(
        &mut self,
        mut callback: F,
    ) -> Result<EvolutionResult, EvolutionError>
    where
        F: FnMut(&GenerationStats),
    {
        let start_time = Instant::now();

        self.config.validate()?;
        self.initialize();
        log::info!(
            "Evolving {} individuals against a {}x{} target",
            self.population.len(),
            self.evaluator.width(),
            self.evaluator.height()
        );

        self.phase = EvolutionPhase::Evaluating;
        self.evaluate_population()?;

        self.phase = EvolutionPhase::Reporting;
        let mut stats = self.record_stats();
        callback(&stats);

        let stop_reason = loop {
            if let Some(reason) = self.should_stop(&stats) {
                break reason;
            }
            stats = self.step()?;
            callback(&stats);
        };

        self.phase = EvolutionPhase::Terminated;

        let elapsed = start_time.elapsed().as_secs_f64();
        let best = self.best().cloned().ok_or(EvolutionError::EmptyPopulation)?;

        log::info!(
            "Stopped after {} generations ({:?}), best fitness {:?}",
            self.generation,
            stop_reason,
            best.fitness()
        );

        Ok(EvolutionResult {
            best,
            stats: RunStats {
                generations: self.generation,
                total_evaluations: self.evaluations,
                snapshots_written: self.snapshots_written,
                final_stats: stats,
                elapsed_seconds: elapsed,
                evaluations_per_second: if elapsed > 0.0 {
                    self.evaluations as f64 / elapsed
                } else {
                    0.0
                },
                stop_reason,
            },
            history: self.history.clone(),
        })
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> Result<EvolutionResult, EvolutionError> {
        self.run_with_callback(|_| {})
    }
}
