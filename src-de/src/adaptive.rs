//! Self-adaptation of the mutation scale and crossover rate.
//!
//! `mu_f` and `mu_cr` are the locations of the distributions every
//! individual's `F_i` and `CR_i` are drawn from; after each generation they
//! move toward the means of the values that produced accepted trials.

use crate::random::RandomSource;

/// Starting location of both distributions
pub const INITIAL_MU: f64 = 0.5;
/// Scale of the Cauchy distribution `F_i` is drawn from
pub const F_SCALE: f64 = 0.1;
/// Standard deviation of the Gaussian `CR_i` is drawn from
pub const CR_STD_DEV: f64 = 0.1;
/// Draws allowed before `F_i` falls back to [`F_FALLBACK`]
pub const F_MAX_ATTEMPTS: usize = 10;
pub const F_FALLBACK: f64 = 0.001;
/// Spread of successful CR values above which PMCRADE uses the quadratic mean
pub const PMCRADE_THRESHOLD: f64 = 0.07;

#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveState {
    pub mu_f: f64,
    pub mu_cr: f64,
    adaptation_rate: f64,
    pmcrade: bool,
}

impl AdaptiveState {
    pub fn new(adaptation_rate: f64, pmcrade: bool) -> Self {
        Self { mu_f: INITIAL_MU, mu_cr: INITIAL_MU, adaptation_rate, pmcrade }
    }

    /// `F_i` from Cauchy(mu_f, 0.1), redrawn while non-positive and capped at 1
    pub fn sample_f(&self, rng: &mut RandomSource) -> f64 {
        for _ in 0..F_MAX_ATTEMPTS {
            let f = rng.cauchy(self.mu_f, F_SCALE);
            if f > 0.0 {
                return f.min(1.0);
            }
        }
        F_FALLBACK
    }

    /// `CR_i` from Normal(mu_cr, 0.1) clamped to [0, 1]
    pub fn sample_cr(&self, rng: &mut RandomSource) -> f64 {
        rng.gaussian(self.mu_cr, CR_STD_DEV).clamp(0.0, 1.0)
    }

    /// Move both locations toward this generation's successful values.
    /// Nothing changes when no trial succeeded.
    pub fn update(&mut self, successful_f: &[f64], successful_cr: &[f64]) {
        let c = self.adaptation_rate;
        if !successful_cr.is_empty() {
            let target = if self.pmcrade && std_dev(successful_cr) >= PMCRADE_THRESHOLD {
                quadratic_mean(successful_cr)
            } else {
                mean(successful_cr)
            };
            self.mu_cr = (1.0 - c) * self.mu_cr + c * target;
        }
        if !successful_f.is_empty() {
            self.mu_f = (1.0 - c) * self.mu_f + c * lehmer_mean(successful_f);
        }
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

fn quadratic_mean(values: &[f64]) -> f64 {
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}

/// `sum(x^2) / sum(x)`
fn lehmer_mean(values: &[f64]) -> f64 {
    let sum: f64 = values.iter().sum();
    if sum > 0.0 { values.iter().map(|v| v * v).sum::<f64>() / sum } else { mean(values) }
}
