use ndarray::{Array1, Array2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Parallel evaluation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Build and evaluate trials on the rayon pool
    pub enabled: bool,
    /// Number of threads to use (None = use rayon default)
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    /// Size the global rayon pool once; later calls keep the existing pool.
    pub fn install(&self) {
        if let Some(n) = self.num_threads {
            if rayon::ThreadPoolBuilder::new().num_threads(n).build_global().is_err() {
                log::debug!("rayon global pool already initialised, ignoring num_threads={}", n);
            }
        }
    }
}

/// Evaluate every row of `population`
pub fn evaluate_population<F>(population: &Array2<f64>, func: &F, config: &ParallelConfig) -> Vec<f64>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    let npop = population.nrows();
    if !config.enabled || npop < 4 {
        return (0..npop).map(|i| func(&population.row(i).to_owned())).collect();
    }
    (0..npop).into_par_iter().map(|i| func(&population.row(i).to_owned())).collect()
}

/// Evaluate one trial per individual, results in input order
pub fn evaluate_trials<F>(trials: &[Array1<f64>], func: &F, config: &ParallelConfig) -> Vec<f64>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    if !config.enabled || trials.len() < 4 {
        return trials.iter().map(func).collect();
    }
    trials.par_iter().map(func).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_matches_sequential() {
        let func = |x: &Array1<f64>| -> f64 { x.iter().map(|&xi| xi * xi).sum() };

        let mut population = Array2::zeros((10, 3));
        for i in 0..10 {
            for j in 0..3 {
                population[[i, j]] = (i as f64) * 0.1 + (j as f64) * 0.01;
            }
        }

        let par = ParallelConfig { enabled: true, num_threads: Some(2) };
        let seq = ParallelConfig::default();
        let energies = evaluate_population(&population, &func, &par);
        assert_eq!(energies, evaluate_population(&population, &func, &seq));
        for i in 0..10 {
            let expected = population.row(i).iter().map(|&x| x * x).sum::<f64>();
            assert!((energies[i] - expected).abs() < 1e-12);
        }

        let trials: Vec<Array1<f64>> = population.rows().into_iter().map(|r| r.to_owned()).collect();
        assert_eq!(evaluate_trials(&trials, &func, &par), energies);
    }
}
