//! Trial acceptance and the per-generation success sets.

use ndarray::Array1;

use crate::Mode;

/// A trial replaces its parent when it is strictly better, or when it ties
/// the global best exactly. NaN is never accepted.
pub fn is_accepted(mode: Mode, trial: f64, current: f64, best: f64) -> bool {
    let better = match mode {
        Mode::Minimize => trial < current,
        Mode::Maximize => trial > current,
    };
    better || trial == best
}

/// Parameters and displaced parents of the trials accepted in one generation
#[derive(Debug, Clone, Default)]
pub struct SuccessSets {
    pub f: Vec<f64>,
    pub cr: Vec<f64>,
    pub parents: Vec<Array1<f64>>,
}

impl SuccessSets {
    pub fn with_capacity(n: usize) -> Self {
        Self { f: Vec::with_capacity(n), cr: Vec::with_capacity(n), parents: Vec::with_capacity(n) }
    }

    pub fn record(&mut self, f: f64, cr: f64, parent: Array1<f64>) {
        self.f.push(f);
        self.cr.push(cr);
        self.parents.push(parent);
    }

    /// Number of accepted trials
    pub fn len(&self) -> usize {
        self.f.len()
    }

    pub fn is_empty(&self) -> bool {
        self.f.is_empty()
    }
}
