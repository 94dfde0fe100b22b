//! Fitness ranking: one `(fitness, slot)` record per individual, kept sorted
//! best-first by an explicit comparator.

use std::cmp::Ordering;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::Mode;
use crate::error::{JadeError, Result};

/// Fitness of the individual stored in population slot `index`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessRecord {
    pub fitness: f64,
    pub index: usize,
}

/// Best-first ordering for `mode`. NaN always sorts last.
pub fn compare_fitness(mode: Mode, a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match mode {
            Mode::Minimize => a.total_cmp(&b),
            Mode::Maximize => b.total_cmp(&a),
        },
    }
}

/// Records sorted best-first; exactly one record per population slot
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessRanking {
    mode: Mode,
    records: Vec<FitnessRecord>,
}

impl FitnessRanking {
    /// Rank already known fitness values; `fitness[i]` belongs to slot `i`
    pub fn from_fitness(fitness: &[f64], mode: Mode) -> Self {
        let records = fitness
            .iter()
            .enumerate()
            .map(|(index, &fitness)| FitnessRecord { fitness, index })
            .collect();
        let mut ranking = Self { mode, records };
        ranking.sort();
        ranking
    }

    /// Stable sort, ties keep their previous relative order
    pub fn sort(&mut self) {
        let mode = self.mode;
        self.records.sort_by(|a, b| compare_fitness(mode, a.fitness, b.fitness));
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FitnessRecord] {
        &self.records
    }

    /// Current best (head)
    pub fn best(&self) -> Option<FitnessRecord> {
        self.records.first().copied()
    }

    /// Current worst (tail)
    pub fn worst(&self) -> Option<FitnessRecord> {
        self.records.last().copied()
    }

    /// Record at rank `k` (0 = best)
    pub fn at_rank(&self, k: usize) -> Option<FitnessRecord> {
        self.records.get(k).copied()
    }

    /// Fitness of slots `0..npop` indexed by slot, built in one pass
    pub fn fitness_by_slot(&self, npop: usize) -> Result<Array1<f64>> {
        let mut out = Array1::from_elem(npop, f64::NAN);
        let mut seen = vec![false; npop];
        for r in &self.records {
            if r.index < npop {
                out[r.index] = r.fitness;
                seen[r.index] = true;
            }
        }
        match seen.iter().position(|&s| !s) {
            Some(index) => Err(JadeError::MissingFitness { index }),
            None => Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimize_order() {
        let ranking = FitnessRanking::from_fitness(&[3.0, 1.0, 2.0], Mode::Minimize);
        let order: Vec<usize> = ranking.records().iter().map(|r| r.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert_eq!(ranking.best().unwrap().fitness, 1.0);
        assert_eq!(ranking.worst().unwrap().fitness, 3.0);
    }

    #[test]
    fn test_maximize_order_and_nan_last() {
        let ranking = FitnessRanking::from_fitness(&[f64::NAN, 1.0, 5.0, 2.0], Mode::Maximize);
        let order: Vec<usize> = ranking.records().iter().map(|r| r.index).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);

        let ranking = FitnessRanking::from_fitness(&[f64::NAN, 1.0], Mode::Minimize);
        assert_eq!(ranking.best().unwrap().index, 1);
    }

    #[test]
    fn test_lookup_by_slot() {
        let ranking = FitnessRanking::from_fitness(&[2.0, 0.0, f64::NAN, 4.0], Mode::Minimize);
        let by_slot = ranking.fitness_by_slot(4).unwrap();
        assert_eq!(by_slot[0], 2.0);
        assert_eq!(by_slot[1], 0.0);
        assert!(by_slot[2].is_nan());
        assert_eq!(by_slot[3], 4.0);
        assert_eq!(ranking.at_rank(1).unwrap().index, 0);
    }

    #[test]
    fn test_missing_slot_reported() {
        let ranking = FitnessRanking::from_fitness(&[1.0, 3.0], Mode::Minimize);
        assert_eq!(ranking.fitness_by_slot(3), Err(JadeError::MissingFitness { index: 2 }));
        assert_eq!(ranking.fitness_by_slot(1).unwrap().len(), 1);
    }

    #[test]
    fn test_one_record_per_slot() {
        let ranking = FitnessRanking::from_fitness(&[1.0, 1.0, 1.0, 0.5], Mode::Minimize);
        let mut slots: Vec<usize> = ranking.records().iter().map(|r| r.index).collect();
        slots.sort_unstable();
        assert_eq!(slots, vec![0, 1, 2, 3]);
        // ties keep slot order
        assert_eq!(ranking.records()[1].index, 0);
    }
}
