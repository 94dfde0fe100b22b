//! Size-capped pool of displaced parents.
//!
//! Entries carry no link to population slots; they only serve as extra
//! `x_r2` donors during mutation.

use ndarray::{Array1, ArrayView1};

use crate::error::{JadeError, Result};
use crate::random::RandomSource;

/// Unordered collection of historical parent vectors
#[derive(Debug, Clone, Default)]
pub struct Archive {
    entries: Vec<Array1<f64>>,
}

impl Archive {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, k: usize) -> Option<ArrayView1<'_, f64>> {
        self.entries.get(k).map(|x| x.view())
    }

    pub fn entries(&self) -> &[Array1<f64>] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Append this generation's displaced parents
    pub fn extend<I>(&mut self, parents: I)
    where
        I: IntoIterator<Item = Array1<f64>>,
    {
        self.entries.extend(parents);
    }

    /// Remove uniformly random entries until at most `cap` remain.
    pub fn cleanup(&mut self, cap: usize, rng: &mut RandomSource) -> Result<()> {
        while self.entries.len() > cap {
            let k = rng.uniform_int(self.entries.len());
            self.entries.swap_remove(k);
        }
        if self.entries.len() > cap {
            return Err(JadeError::ArchiveOverflow { size: self.entries.len(), cap });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_cleanup_keeps_cap_and_members() {
        let mut archive = Archive::new();
        let pool: Vec<Array1<f64>> = (0..25).map(|k| array![k as f64, -(k as f64)]).collect();
        archive.extend(pool.iter().cloned());
        assert_eq!(archive.len(), 25);

        let mut rng = RandomSource::from_seed(21);
        archive.cleanup(10, &mut rng).unwrap();
        assert_eq!(archive.len(), 10);
        for entry in archive.entries() {
            assert!(pool.contains(entry));
        }
        // no duplicates
        let mut firsts: Vec<i64> = archive.entries().iter().map(|x| x[0] as i64).collect();
        firsts.sort_unstable();
        firsts.dedup();
        assert_eq!(firsts.len(), 10);
    }

    #[test]
    fn test_cleanup_below_cap_is_noop() {
        let mut archive = Archive::new();
        archive.extend(vec![array![1.0], array![2.0]]);
        let mut rng = RandomSource::from_seed(1);
        archive.cleanup(5, &mut rng).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.get(1).unwrap()[0], 2.0);
        assert!(archive.get(2).is_none());
        archive.clear();
        assert!(archive.is_empty());
    }
}
