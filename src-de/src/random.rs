//! Per-instance random variate service.
//!
//! Every optimizer owns one `RandomSource`; nothing is global, so several
//! instances (worker threads, tests) stay independent and reproducible when
//! seeded explicitly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Cauchy, Distribution, Normal};

/// Owned random source supplying the draws used by the JADE operators
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Seeded source, or one seeded from OS entropy when `seed` is `None`
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::from_seed(s),
            None => Self::from_entropy(),
        }
    }

    /// Deterministic source
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Source seeded from the thread-local OS-backed generator
    pub fn from_entropy() -> Self {
        let mut thread_rng = rand::rng();
        Self { rng: StdRng::from_rng(&mut thread_rng) }
    }

    /// Uniform real draw in `[lo, hi)`; returns `lo` for an empty interval
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi > lo { self.rng.random_range(lo..hi) } else { lo }
    }

    /// Uniform real draw in `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform integer draw in `[0, n)`. `n` must be positive.
    pub fn uniform_int(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "uniform_int on an empty range");
        self.rng.random_range(0..n)
    }

    /// Gaussian draw; a non-positive or non-finite deviation degenerates to `mean`
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(dist) if std_dev > 0.0 => dist.sample(&mut self.rng),
            _ => mean,
        }
    }

    /// Cauchy draw; a non-positive or non-finite scale degenerates to `location`
    pub fn cauchy(&mut self, location: f64, scale: f64) -> f64 {
        match Cauchy::new(location, scale) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(_) => location,
        }
    }

    /// Fresh seed for a child source (used to fan work out to threads)
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random::<u64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = RandomSource::from_seed(7);
        let mut b = RandomSource::from_seed(7);
        for _ in 0..50 {
            assert_eq!(a.uniform(-1.0, 1.0), b.uniform(-1.0, 1.0));
            assert_eq!(a.cauchy(0.5, 0.1), b.cauchy(0.5, 0.1));
            assert_eq!(a.uniform_int(13), b.uniform_int(13));
        }
    }

    #[test]
    fn test_uniform_ranges() {
        let mut rng = RandomSource::from_seed(1);
        for _ in 0..1000 {
            let u = rng.uniform(-5.0, 5.0);
            assert!((-5.0..5.0).contains(&u));
            let k = rng.uniform_int(4);
            assert!(k < 4);
            let v = rng.unit();
            assert!((0.0..1.0).contains(&v));
        }
        assert_eq!(rng.uniform(2.0, 2.0), 2.0);
    }

    #[test]
    fn test_gaussian_moments() {
        let mut rng = RandomSource::from_seed(3);
        let n = 20_000;
        let draws: Vec<f64> = (0..n).map(|_| rng.gaussian(0.5, 0.1)).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.01, "mean = {}", mean);
        assert!((var.sqrt() - 0.1).abs() < 0.01, "std = {}", var.sqrt());
    }

    #[test]
    fn test_cauchy_median() {
        let mut rng = RandomSource::from_seed(5);
        let mut draws: Vec<f64> = (0..20_001).map(|_| rng.cauchy(0.5, 0.1)).collect();
        draws.sort_by(f64::total_cmp);
        let median = draws[draws.len() / 2];
        assert!((median - 0.5).abs() < 0.01, "median = {}", median);
    }

    #[test]
    fn test_degenerate_scales() {
        let mut rng = RandomSource::from_seed(9);
        assert_eq!(rng.gaussian(0.3, 0.0), 0.3);
        assert_eq!(rng.cauchy(0.3, 0.0), 0.3);
    }
}
