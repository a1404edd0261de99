use crate::error::ConfigError;
use rand::Rng;
use rand_distr::StandardNormal;

pub const MUTATION_SCALE: f64 = 5.0;

pub const WEIGHT_MIN: f64 = -1.0;
pub const WEIGHT_MAX: f64 = 1.0;

/// Per-parameter Gaussian mutation.
///
/// A parameter is left alone when a uniform draw falls below the threshold,
/// so the chance of a perturbation is `1 - threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mutator {
    threshold: f64,
}

impl Mutator {
    pub fn from_probability(probability: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ConfigError::InvalidMutationProbability(probability));
        }

        Ok(Self {
            threshold: 1.0 - probability,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn probability(&self) -> f64 {
        1.0 - self.threshold
    }

    pub fn mutate<R: Rng + ?Sized>(&self, weight: f64, rng: &mut R) -> f64 {
        if rng.gen::<f64>() < self.threshold {
            return weight;
        }

        let noise: f64 = rng.sample(StandardNormal);
        (weight + noise / MUTATION_SCALE).clamp(WEIGHT_MIN, WEIGHT_MAX)
    }

    #[cfg(test)]
    pub fn mutate_all<R: Rng + ?Sized>(&self, weights: &[f64], rng: &mut R) -> Vec<f64> {
        weights.iter().map(|&w| self.mutate(w, rng)).collect()
    }
}
