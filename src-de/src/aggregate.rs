//! Cross-run statistics over independent optimizer instances.
//!
//! Each participant evolves its own population; the only collective step is
//! [`Aggregator::all_gather`] at the end of a run. The gather blocks until
//! every participant has contributed and has no timeout.

use std::fmt;
use std::sync::{Arc, Barrier};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{JadeError, Result};

/// Collective exchange of one scalar per participant
pub trait Aggregator {
    /// Position of this participant; rank 0 is the reporting participant
    fn rank(&self) -> usize;

    /// Contribute `value` and receive every participant's value ordered by rank
    fn all_gather(&mut self, value: f64) -> Result<Vec<f64>>;
}

/// Single participant: the gather returns the local value only
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAggregator;

impl Aggregator for LocalAggregator {
    fn rank(&self) -> usize {
        0
    }

    fn all_gather(&mut self, value: f64) -> Result<Vec<f64>> {
        Ok(vec![value])
    }
}

struct GroupShared {
    slots: Mutex<Vec<Option<f64>>>,
    barrier: Barrier,
}

/// Collective for instances running on threads of one process
#[derive(Clone)]
pub struct InProcessGroup {
    shared: Arc<GroupShared>,
    participants: usize,
}

impl InProcessGroup {
    pub fn new(participants: usize) -> Self {
        let participants = participants.max(1);
        Self {
            shared: Arc::new(GroupShared {
                slots: Mutex::new(vec![None; participants]),
                barrier: Barrier::new(participants),
            }),
            participants,
        }
    }

    pub fn participants(&self) -> usize {
        self.participants
    }

    /// Handle for participant `rank`
    pub fn member(&self, rank: usize) -> Result<InProcessAggregator> {
        if rank >= self.participants {
            return Err(JadeError::Transport(format!(
                "rank {} outside group of {}",
                rank, self.participants
            )));
        }
        Ok(InProcessAggregator { shared: Arc::clone(&self.shared), rank })
    }

    /// One handle per rank, in rank order
    pub fn members(&self) -> Vec<InProcessAggregator> {
        (0..self.participants)
            .map(|rank| InProcessAggregator { shared: Arc::clone(&self.shared), rank })
            .collect()
    }
}

impl fmt::Debug for InProcessGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InProcessGroup").field("participants", &self.participants).finish()
    }
}

/// Participant handle of an [`InProcessGroup`]; move one into each worker thread
pub struct InProcessAggregator {
    shared: Arc<GroupShared>,
    rank: usize,
}

impl fmt::Debug for InProcessAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InProcessAggregator").field("rank", &self.rank).finish()
    }
}

impl Aggregator for InProcessAggregator {
    fn rank(&self) -> usize {
        self.rank
    }

    fn all_gather(&mut self, value: f64) -> Result<Vec<f64>> {
        self.shared.slots.lock()[self.rank] = Some(value);
        self.shared.barrier.wait();
        let gathered: Option<Vec<f64>> = self.shared.slots.lock().iter().copied().collect();
        // nobody may refill a slot before everyone has read this round
        self.shared.barrier.wait();
        gathered.ok_or_else(|| JadeError::Transport("missing contribution in gather".to_string()))
    }
}

/// Mean and spread of the gathered best fitness values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// `100 * std_dev / mean`
    pub rel_std_percent: f64,
    pub runs: usize,
}

impl RunStatistics {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let size = values.len() as f64;
        let mean = values.iter().sum::<f64>() / size;
        let std_dev = (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / size).sqrt();
        Some(Self { mean, std_dev, rel_std_percent: std_dev * 100.0 / mean, runs: values.len() })
    }
}

/// Gather every participant's best fitness. Only instances at reporting
/// level 0 take part; others get an empty vector without communicating.
pub fn gather_final_fitness(
    aggregator: &mut dyn Aggregator,
    best_fitness: f64,
    report_level: u32,
) -> Result<Vec<f64>> {
    if report_level != 0 {
        return Ok(Vec::new());
    }
    aggregator.all_gather(best_fitness)
}

/// [`gather_final_fitness`] reduced to [`RunStatistics`]
pub fn gather_statistics(
    aggregator: &mut dyn Aggregator,
    best_fitness: f64,
    report_level: u32,
) -> Result<Option<RunStatistics>> {
    let values = gather_final_fitness(aggregator, best_fitness, report_level)?;
    let stats = RunStatistics::from_values(&values);
    if let Some(s) = &stats {
        log::debug!("rank {} gathered {} results, mean {:e}", aggregator.rank(), s.runs, s.mean);
    }
    Ok(stats)
}
