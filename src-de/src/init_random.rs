use ndarray::{Array1, Array2};

use crate::bounds::Bounds;
use crate::error::{JadeError, Result};
use crate::random::RandomSource;

/// Every feed vector must have the problem dimension and lie inside `bounds`
pub(crate) fn check_feed(bounds: &Bounds, feed: &[Array1<f64>]) -> Result<()> {
    let n = bounds.dimension();
    for (index, x) in feed.iter().enumerate() {
        if x.len() != n {
            return Err(JadeError::FeedDimensionMismatch { index, expected: n, got: x.len() });
        }
        let outside = x
            .iter()
            .zip(bounds.lower().iter().zip(bounds.upper().iter()))
            .position(|(&v, (&lo, &hi))| !(v >= lo && v <= hi));
        if let Some(dim) = outside {
            return Err(JadeError::FeedOutOfBounds { index, dim, value: x[dim] });
        }
    }
    Ok(())
}

/// Build the initial population: `npop - feed.len()` rows drawn uniformly
/// inside `bounds`, followed by the feed vectors copied verbatim.
pub(crate) fn init_population(
    bounds: &Bounds,
    npop: usize,
    feed: &[Array1<f64>],
    rng: &mut RandomSource,
) -> Result<Array2<f64>> {
    let n = bounds.dimension();
    if npop == 0 {
        return Err(JadeError::EmptyPopulation);
    }
    if feed.len() >= npop {
        return Err(JadeError::FeedTooLarge { feed: feed.len(), popsize: npop });
    }
    check_feed(bounds, feed)?;

    let n_random = npop - feed.len();
    let lower = bounds.lower();
    let upper = bounds.upper();
    let mut pop = Array2::<f64>::zeros((npop, n));
    for i in 0..n_random {
        for j in 0..n {
            pop[(i, j)] = rng.uniform(lower[j], upper[j]);
        }
    }
    for (k, x) in feed.iter().enumerate() {
        log::debug!("feed vector {} enters slot {}: {:?}", k, n_random + k, x.to_vec());
        pop.row_mut(n_random + k).assign(x);
    }
    Ok(pop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_random_rows_within_bounds() {
        let bounds = Bounds::from_pairs(&[(-5.0, 5.0), (10.0, 20.0)]).unwrap();
        let mut rng = RandomSource::from_seed(11);
        let pop = init_population(&bounds, 50, &[], &mut rng).unwrap();
        assert_eq!(pop.dim(), (50, 2));
        for row in pop.rows() {
            assert!(bounds.contains(row));
        }
    }

    #[test]
    fn test_feed_vectors_kept_unmodified() {
        let bounds = Bounds::uniform(3, -1.0, 1.0).unwrap();
        let feed = vec![array![0.1, 0.2, 0.3], array![-0.9, 0.0, 0.9]];
        let mut rng = RandomSource::from_seed(12);
        let pop = init_population(&bounds, 6, &feed, &mut rng).unwrap();
        assert_eq!(pop.nrows(), 6);
        for x in &feed {
            assert!(pop.rows().into_iter().any(|row| row == x.view()));
        }
    }

    #[test]
    fn test_feed_errors() {
        let bounds = Bounds::uniform(2, -1.0, 1.0).unwrap();
        let mut rng = RandomSource::from_seed(13);
        let feed = vec![array![0.0, 0.0], array![0.5, 0.5]];
        assert_eq!(
            init_population(&bounds, 2, &feed, &mut rng),
            Err(JadeError::FeedTooLarge { feed: 2, popsize: 2 })
        );
        let bad = vec![array![0.0, 0.0, 0.0]];
        assert_eq!(
            init_population(&bounds, 4, &bad, &mut rng),
            Err(JadeError::FeedDimensionMismatch { index: 0, expected: 2, got: 3 })
        );
    }

    #[test]
    fn test_feed_outside_bounds_rejected() {
        let bounds = Bounds::from_pairs(&[(-1.0, 1.0), (0.0, 2.0)]).unwrap();
        let mut rng = RandomSource::from_seed(14);
        let feed = vec![array![1.0, 2.0], array![0.0, -0.5]];
        assert_eq!(
            init_population(&bounds, 4, &feed, &mut rng),
            Err(JadeError::FeedOutOfBounds { index: 1, dim: 1, value: -0.5 })
        );
        assert!(matches!(
            check_feed(&bounds, &[array![f64::NAN, 1.0]]),
            Err(JadeError::FeedOutOfBounds { index: 0, dim: 0, .. })
        ));
    }
}
