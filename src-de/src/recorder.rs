use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::ranking::compare_fitness;
use crate::{CallbackAction, JadeIntermediate, Mode};

/// Records optimization progress via the per-generation callback
#[derive(Debug, Clone)]
pub struct OptimizationRecorder {
    /// Function name (used for the CSV filename)
    function_name: String,
    mode: Mode,
    records: Arc<Mutex<Vec<OptimizationRecord>>>,
}

/// State after one generation
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationRecord {
    pub iteration: usize,
    /// Best individual after this generation
    pub x: Vec<f64>,
    pub best_result: f64,
    pub worst_result: f64,
    pub mu_f: f64,
    pub mu_cr: f64,
    pub archive_size: usize,
    pub accepted: usize,
    /// Standard deviation of the population fitness
    pub convergence: f64,
    /// Whether this generation improved the best known result
    pub is_improvement: bool,
}

impl OptimizationRecorder {
    pub fn new(function_name: impl Into<String>, mode: Mode) -> Self {
        Self { function_name: function_name.into(), mode, records: Arc::new(Mutex::new(Vec::new())) }
    }

    /// Callback appending one record per generation; always continues
    pub fn create_callback(&self) -> Box<dyn FnMut(&JadeIntermediate) -> CallbackAction + Send> {
        let records = Arc::clone(&self.records);
        let mode = self.mode;
        Box::new(move |it: &JadeIntermediate| -> CallbackAction {
            let mut guard = records.lock();
            let is_improvement = match guard.last() {
                Some(prev) => compare_fitness(mode, it.fun, prev.best_result).is_lt(),
                None => true,
            };
            guard.push(OptimizationRecord {
                iteration: it.iter,
                x: it.x.to_vec(),
                best_result: it.fun,
                worst_result: it.worst_fun,
                mu_f: it.mu_f,
                mu_cr: it.mu_cr,
                archive_size: it.archive_size,
                accepted: it.accepted,
                convergence: it.convergence,
                is_improvement,
            });
            CallbackAction::Continue
        })
    }

    /// Write all records to `<output_dir>/<function_name>.csv`
    pub fn save_to_csv(&self, output_dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
        create_dir_all(output_dir)?;
        let filename = output_dir.join(format!("{}.csv", self.function_name));
        let mut writer = csv::Writer::from_path(&filename)?;

        let records = self.records.lock();
        let Some(first) = records.first() else {
            writer.flush()?;
            return Ok(filename);
        };

        let mut header = vec!["iteration".to_string()];
        header.extend((0..first.x.len()).map(|i| format!("x{}", i)));
        header.extend(
            [
                "best_result",
                "worst_result",
                "mu_f",
                "mu_cr",
                "archive_size",
                "accepted",
                "convergence",
                "is_improvement",
            ]
            .iter()
            .map(|s| s.to_string()),
        );
        writer.write_record(&header)?;

        for r in records.iter() {
            let mut row = vec![r.iteration.to_string()];
            row.extend(r.x.iter().map(|xi| format!("{:.16}", xi)));
            row.push(format!("{:.16}", r.best_result));
            row.push(format!("{:.16}", r.worst_result));
            row.push(format!("{:.16}", r.mu_f));
            row.push(format!("{:.16}", r.mu_cr));
            row.push(r.archive_size.to_string());
            row.push(r.accepted.to_string());
            row.push(format!("{:.16}", r.convergence));
            row.push(r.is_improvement.to_string());
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(filename)
    }

    pub fn get_records(&self) -> Vec<OptimizationRecord> {
        self.records.lock().clone()
    }

    pub fn num_iterations(&self) -> usize {
        self.records.lock().len()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    /// Best individual and fitness of the last recorded generation
    pub fn get_best_solution(&self) -> Option<(Vec<f64>, f64)> {
        self.records.lock().last().map(|r| (r.x.clone(), r.best_result))
    }
}
