//! Individuals and the random operators that create and vary them.
//!
//! Provides random generation, two-point crossover, and channel-nudge mutation.

use std::ops::Range;

use rand::prelude::*;

use super::error::EvolutionError;
use crate::compute::quantize::{CHANNEL_MAX, quantize};

/// One RGB triple. Channels are signed so unclamped mutation can drift out of range.
pub type Pixel = [i32; 3];

/// A candidate image: one pixel per target pixel in row-major order, plus a
/// cached fitness that is cleared whenever the pixels change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    genome: Vec<Pixel>,
    fitness: Option<u64>,
}

impl Individual {
    /// Wrap an existing pixel sequence. No fitness is cached.
    pub fn from_pixels(genome: Vec<Pixel>) -> Self {
        Self {
            genome,
            fitness: None,
        }
    }

    /// An individual with every pixel set to `pixel`.
    pub fn filled(len: usize, pixel: Pixel) -> Self {
        Self::from_pixels(vec![pixel; len])
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.genome
    }

    pub fn len(&self) -> usize {
        self.genome.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genome.is_empty()
    }

    /// Cached fitness, if the individual was evaluated since its last change.
    pub fn fitness(&self) -> Option<u64> {
        self.fitness
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    pub(crate) fn set_fitness(&mut self, fitness: u64) {
        self.fitness = Some(fitness);
    }

    /// Drop the cached fitness.
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Overwrite one pixel, invalidating the cached fitness.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_pixel(&mut self, index: usize, pixel: Pixel) {
        self.genome[index] = pixel;
        self.invalidate();
    }

    /// Interleaved RGB bytes for encoding. Out-of-range channels saturate.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.genome
            .iter()
            .flat_map(|pixel| pixel.map(|c| c.clamp(0, CHANNEL_MAX) as u8))
            .collect()
    }
}

/// Random number generator wrapper for genome operations.
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A random pixel with every channel quantized.
    pub fn random_pixel(&mut self) -> Pixel {
        [(); 3].map(|_| quantize(self.rng.gen_range(0..=CHANNEL_MAX)))
    }

    /// A random individual covering a `width` x `height` target.
    pub fn random_individual(&mut self, width: usize, height: usize) -> Individual {
        let genome = (0..width * height).map(|_| self.random_pixel()).collect();
        Individual::from_pixels(genome)
    }

    /// `size` independent random individuals.
    pub fn random_population(
        &mut self,
        size: usize,
        width: usize,
        height: usize,
    ) -> Vec<Individual> {
        (0..size)
            .map(|_| self.random_individual(width, height))
            .collect()
    }

    /// Bernoulli trial with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p)
    }

    /// Uniform index in `0..len`.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Two-point crossover: swap a random segment `[p1, p2)` between `a` and `b`.
    ///
    /// Cut points are distinct with `0 <= p1 < p2 <= len`. Both individuals lose
    /// their cached fitness. Returns the swapped range.
    pub fn crossover_two_point(
        &mut self,
        a: &mut Individual,
        b: &mut Individual,
    ) -> Result<Range<usize>, EvolutionError> {
        if a.len() != b.len() {
            return Err(EvolutionError::GenomeLengthMismatch {
                left: a.len(),
                right: b.len(),
            });
        }

        let len = a.len();
        let range = if len == 0 {
            0..0
        } else {
            let mut p1 = self.rng.gen_range(0..=len);
            let mut p2 = self.rng.gen_range(0..len);
            if p2 >= p1 {
                p2 += 1;
            } else {
                std::mem::swap(&mut p1, &mut p2);
            }
            p1..p2
        };

        a.genome[range.clone()].swap_with_slice(&mut b.genome[range.clone()]);
        a.invalidate();
        b.invalidate();

        Ok(range)
    }

    /// Nudge random channels by `-step`, `0` or `+step`.
    ///
    /// Each pixel is touched with probability `gene_rate`; a touched pixel has
    /// one uniformly chosen channel nudged. With `clamp` set the result is kept
    /// inside `[0, 255]`. Returns whether any channel changed; if so the cached
    /// fitness is cleared.
    pub fn mutate(
        &mut self,
        individual: &mut Individual,
        gene_rate: f64,
        step: i32,
        clamp: bool,
    ) -> bool {
        let mut changed = false;

        for pixel in &mut individual.genome {
            if !self.rng.gen_bool(gene_rate) {
                continue;
            }

            let channel = self.rng.gen_range(0..3);
            let delta = self.rng.gen_range(-1..=1) * step;
            let mut value = pixel[channel] + delta;
            if clamp {
                value = value.clamp(0, CHANNEL_MAX);
            }

            if value != pixel[channel] {
                pixel[channel] = value;
                changed = true;
            }
        }

        if changed {
            individual.invalidate();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::quantize::QUANTUM;

    fn is_quantized(c: i32) -> bool {
        c == CHANNEL_MAX || (c % QUANTUM == 0 && (0..CHANNEL_MAX).contains(&c))
    }

    #[test]
    fn test_random_individual() {
        let mut rng = GenomeRng::new(42);
        let individual = rng.random_individual(7, 5);

        assert_eq!(individual.len(), 35);
        assert!(!individual.is_evaluated());
        assert!(
            individual
                .pixels()
                .iter()
                .flat_map(|p| p.iter())
                .all(|&c| is_quantized(c))
        );
    }

    #[test]
    fn test_random_population() {
        let mut rng = GenomeRng::new(42);
        let population = rng.random_population(10, 4, 3);

        assert_eq!(population.len(), 10);
        assert!(population.iter().all(|ind| ind.len() == 12));
    }

    #[test]
    fn test_crossover_swaps_only_segment() {
        let mut rng = GenomeRng::new(42);

        for _ in 0..50 {
            let parent_a = rng.random_individual(10, 1);
            let parent_b = rng.random_individual(10, 1);
            let mut a = parent_a.clone();
            let mut b = parent_b.clone();

            let range = rng.crossover_two_point(&mut a, &mut b).unwrap();

            assert!(range.start < range.end);
            assert!(range.end <= 10);
            assert_eq!(a.len(), 10);
            assert_eq!(b.len(), 10);
            for i in 0..10 {
                if range.contains(&i) {
                    assert_eq!(a.pixels()[i], parent_b.pixels()[i]);
                    assert_eq!(b.pixels()[i], parent_a.pixels()[i]);
                } else {
                    assert_eq!(a.pixels()[i], parent_a.pixels()[i]);
                    assert_eq!(b.pixels()[i], parent_b.pixels()[i]);
                }
            }
        }
    }

    #[test]
    fn test_crossover_invalidates_fitness() {
        let mut rng = GenomeRng::new(1);
        let mut a = rng.random_individual(3, 3);
        let mut b = rng.random_individual(3, 3);
        a.set_fitness(10);
        b.set_fitness(20);

        rng.crossover_two_point(&mut a, &mut b).unwrap();

        assert_eq!(a.fitness(), None);
        assert_eq!(b.fitness(), None);
    }

    #[test]
    fn test_crossover_single_pixel_swaps_everything() {
        let mut rng = GenomeRng::new(3);
        let mut a = Individual::filled(1, [10, 20, 30]);
        let mut b = Individual::filled(1, [40, 50, 60]);

        let range = rng.crossover_two_point(&mut a, &mut b).unwrap();

        assert_eq!(range, 0..1);
        assert_eq!(a.pixels(), &[[40, 50, 60]]);
        assert_eq!(b.pixels(), &[[10, 20, 30]]);
    }

    #[test]
    fn test_crossover_length_mismatch() {
        let mut rng = GenomeRng::new(42);
        let mut a = rng.random_individual(3, 1);
        let mut b = rng.random_individual(4, 1);

        assert_eq!(
            rng.crossover_two_point(&mut a, &mut b),
            Err(EvolutionError::GenomeLengthMismatch { left: 3, right: 4 })
        );
    }

    #[test]
    fn test_mutation_nudges_by_step() {
        let mut rng = GenomeRng::new(42);
        let original = Individual::filled(200, [120, 120, 120]);
        let mut mutant = original.clone();
        mutant.set_fitness(5);

        let changed = rng.mutate(&mut mutant, 1.0, 10, true);

        assert!(changed);
        assert_eq!(mutant.fitness(), None);
        for (before, after) in original.pixels().iter().zip(mutant.pixels()) {
            let diffs: Vec<i32> = (0..3).map(|c| after[c] - before[c]).collect();
            assert!(diffs.iter().filter(|&&d| d != 0).count() <= 1);
            assert!(diffs.iter().all(|d| [-10, 0, 10].contains(d)));
        }
    }

    #[test]
    fn test_mutation_zero_rate_keeps_fitness() {
        let mut rng = GenomeRng::new(42);
        let mut individual = rng.random_individual(5, 5);
        individual.set_fitness(99);
        let before = individual.clone();

        assert!(!rng.mutate(&mut individual, 0.0, 10, true));
        assert_eq!(individual, before);
        assert_eq!(individual.fitness(), Some(99));
    }

    #[test]
    fn test_mutation_clamping() {
        let mut rng = GenomeRng::new(7);
        let mut clamped = Individual::filled(500, [0, 255, 0]);
        let mut drifting = clamped.clone();

        for _ in 0..20 {
            rng.mutate(&mut clamped, 1.0, 10, true);
            rng.mutate(&mut drifting, 1.0, 10, false);
        }

        let channels = |ind: &Individual| -> Vec<i32> {
            ind.pixels().iter().flat_map(|p| p.iter().copied()).collect()
        };
        assert!(channels(&clamped).iter().all(|c| (0..=255).contains(c)));
        assert!(channels(&drifting).iter().any(|c| !(0..=255).contains(c)));
    }

    #[test]
    fn test_clamped_white_steps_off_grid() {
        let mut rng = GenomeRng::new(11);
        let mut white = Individual::filled(64, [255, 255, 255]);
        rng.mutate(&mut white, 1.0, 10, true);

        let channels: Vec<i32> = white.pixels().iter().flat_map(|p| p.iter().copied()).collect();
        assert!(channels.iter().all(|&c| c == 255 || c == 245));
        assert!(channels.contains(&245));
        assert_ne!(quantize(245), 245);
    }

    #[test]
    fn test_rgb_bytes_saturate() {
        let individual = Individual::from_pixels(vec![[-10, 128, 300], [255, 0, 10]]);
        assert_eq!(individual.to_rgb_bytes(), vec![0, 128, 255, 255, 0, 10]);
    }

    #[test]
    fn test_set_pixel_invalidates() {
        let mut individual = Individual::filled(4, [0, 0, 0]);
        individual.set_fitness(1);
        individual.set_pixel(2, [10, 10, 10]);

        assert_eq!(individual.fitness(), None);
        assert_eq!(individual.pixels()[2], [10, 10, 10]);
    }
}
