//! Fitness evaluation against the target image.
//!
//! Fitness is the summed squared RGB distance between an individual and the
//! quantized target. Lower is better; an exact match scores zero.

use std::sync::Arc;

use super::error::EvolutionError;
use super::genome::{Individual, Pixel};
use crate::compute::quantize::quantize_rgb;
use crate::raster::TargetImage;

/// Squared Euclidean distance between two RGB triples.
#[inline]
pub fn squared_color_distance(a: Pixel, b: Pixel) -> u64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = i64::from(x) - i64::from(y);
            (d * d) as u64
        })
        .sum()
}

/// Scores individuals against a shared, read-only target.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    target: Arc<TargetImage>,
    /// Target pixels, quantized once up front.
    quantized: Vec<Pixel>,
}

impl FitnessEvaluator {
    /// Create a new fitness evaluator.
    pub fn new(target: Arc<TargetImage>) -> Self {
        let quantized = target.pixels().iter().map(|&p| quantize_rgb(p)).collect();
        Self { target, quantized }
    }

    pub fn target(&self) -> &TargetImage {
        &self.target
    }

    pub fn width(&self) -> usize {
        self.target.width()
    }

    pub fn height(&self) -> usize {
        self.target.height()
    }

    /// Number of pixels every individual must carry.
    pub fn genome_len(&self) -> usize {
        self.quantized.len()
    }

    /// Fitness of a pixel sequence without touching any cache.
    pub fn fitness_of(&self, pixels: &[Pixel]) -> Result<u64, EvolutionError> {
        if pixels.len() != self.quantized.len() {
            return Err(EvolutionError::TargetSizeMismatch {
                expected: self.quantized.len(),
                actual: pixels.len(),
            });
        }

        Ok(pixels
            .iter()
            .zip(&self.quantized)
            .map(|(&p, &t)| squared_color_distance(p, t))
            .sum())
    }

    /// Evaluate an individual and cache the result on it.
    pub fn evaluate(&self, individual: &mut Individual) -> Result<u64, EvolutionError> {
        let fitness = self.fitness_of(individual.pixels())?;
        individual.set_fitness(fitness);
        Ok(fitness)
    }
}
