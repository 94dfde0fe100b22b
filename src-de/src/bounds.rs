use ndarray::{Array1, ArrayView1};

use crate::error::{JadeError, Result};

/// Box constraints: `lower[d] < upper[d]` for every dimension `d`
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Array1<f64>,
    upper: Array1<f64>,
}

impl Bounds {
    /// Per-dimension bounds. Fails on empty, mismatched, inverted, equal or
    /// non-finite bounds.
    pub fn new(lower: Array1<f64>, upper: Array1<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(JadeError::BoundsMismatch { lower_len: lower.len(), upper_len: upper.len() });
        }
        if lower.is_empty() {
            return Err(JadeError::EmptyDimension);
        }
        for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if !lo.is_finite() || !hi.is_finite() || lo >= hi {
                return Err(JadeError::InvalidBounds { index, lower: lo, upper: hi });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Same `[lower, upper]` interval in every one of `dim` dimensions
    pub fn uniform(dim: usize, lower: f64, upper: f64) -> Result<Self> {
        Self::new(Array1::from_elem(dim, lower), Array1::from_elem(dim, upper))
    }

    /// Bounds from `(lower, upper)` pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        let lower = pairs.iter().map(|p| p.0).collect::<Array1<f64>>();
        let upper = pairs.iter().map(|p| p.1).collect::<Array1<f64>>();
        Self::new(lower, upper)
    }

    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self) -> &Array1<f64> {
        &self.lower
    }

    pub fn upper(&self) -> &Array1<f64> {
        &self.upper
    }

    /// True when every component of `x` lies in its closed interval
    pub fn contains(&self, x: ArrayView1<f64>) -> bool {
        x.len() == self.dimension()
            && x.iter()
                .zip(self.lower.iter().zip(self.upper.iter()))
                .all(|(&v, (&lo, &hi))| v >= lo && v <= hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_valid_bounds() {
        let b = Bounds::from_pairs(&[(-1.0, 1.0), (0.0, 10.0)]).unwrap();
        assert_eq!(b.dimension(), 2);
        assert!(b.contains(array![0.0, 10.0].view()));
        assert!(!b.contains(array![0.0, 10.5].view()));
        assert!(!b.contains(array![0.0].view()));
    }

    #[test]
    fn test_invalid_bounds() {
        assert_eq!(Bounds::uniform(0, -1.0, 1.0), Err(JadeError::EmptyDimension));
        assert!(matches!(
            Bounds::uniform(3, 1.0, 1.0),
            Err(JadeError::InvalidBounds { index: 0, .. })
        ));
        assert!(matches!(
            Bounds::from_pairs(&[(0.0, 1.0), (5.0, 1.0)]),
            Err(JadeError::InvalidBounds { index: 1, .. })
        ));
        assert!(matches!(
            Bounds::new(array![0.0, 0.0], array![1.0]),
            Err(JadeError::BoundsMismatch { lower_len: 2, upper_len: 1 })
        ));
        assert!(Bounds::uniform(2, f64::NEG_INFINITY, 0.0).unwrap_err().is_config_error());
    }
}
