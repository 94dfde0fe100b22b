use crate::{Bounds, Jade, JadeConfig, JadeReport, Result};
use ndarray::Array1;

/// Convenience function in the shape of SciPy's `differential_evolution`:
/// - `func`: objective function mapping x -> f(x)
/// - `bounds`: vector of (lower, upper) pairs
/// - `config`: JADE configuration
pub fn jade<F>(func: &F, bounds: &[(f64, f64)], config: JadeConfig) -> Result<JadeReport>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	let bounds = Bounds::from_pairs(bounds)?;
	Jade::new(func, bounds, config)?.solve()
}
