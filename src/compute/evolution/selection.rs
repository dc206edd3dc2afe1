//! Tournament selection.

use super::error::EvolutionError;
use super::genome::{GenomeRng, Individual};

/// Pick one survivor: draw `size` contestants uniformly with replacement and
/// return the index of the lowest-fitness one (first drawn wins ties).
///
/// Every contestant must carry a valid fitness.
pub fn tournament_index(
    population: &[Individual],
    size: usize,
    rng: &mut GenomeRng,
) -> Result<usize, EvolutionError> {
    if population.is_empty() {
        return Err(EvolutionError::EmptyPopulation);
    }

    let mut best: Option<(usize, u64)> = None;
    for _ in 0..size.max(1) {
        let idx = rng.index(population.len());
        let fitness = population[idx]
            .fitness()
            .ok_or(EvolutionError::Unevaluated { index: idx })?;

        if best.is_none_or(|(_, best_fitness)| fitness < best_fitness) {
            best = Some((idx, fitness));
        }
    }

    best.map(|(idx, _)| idx).ok_or(EvolutionError::EmptyPopulation)
}

/// Run `count` independent tournaments and clone the winners.
pub fn select_tournament(
    population: &[Individual],
    count: usize,
    size: usize,
    rng: &mut GenomeRng,
) -> Result<Vec<Individual>, EvolutionError> {
    (0..count)
        .map(|_| tournament_index(population, size, rng).map(|idx| population[idx].clone()))
        .collect()
}
