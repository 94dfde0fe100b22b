use std::path::{Path, PathBuf};

use ndarray::Array1;

use crate::recorder::OptimizationRecorder;
use crate::{Bounds, Jade, JadeConfig, JadeReport};

/// Run JADE while recording every generation, then save the history as
/// `<output_dir>/<function_name>.csv`
pub fn run_recorded_jade<F>(
	function_name: &str,
	func: &F,
	bounds: Bounds,
	config: JadeConfig,
	output_dir: &Path,
) -> Result<(JadeReport, PathBuf), Box<dyn std::error::Error>>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	let recorder = OptimizationRecorder::new(function_name, config.mode);
	let mut optimizer = Jade::new(func, bounds, config)?;
	optimizer.set_callback(recorder.create_callback());
	let report = optimizer.solve()?;
	let csv_path = recorder.save_to_csv(output_dir)?;
	Ok((report, csv_path))
}
