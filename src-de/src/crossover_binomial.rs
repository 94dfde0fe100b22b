use ndarray::{Array1, ArrayView1};

use crate::random::RandomSource;

/// Take `mutant[j]` where `j == j_rand` or a unit draw falls below `cr`,
/// the parent's component elsewhere.
pub(crate) fn binomial_crossover(
    target: ArrayView1<f64>,
    mutant: &Array1<f64>,
    cr: f64,
    rng: &mut RandomSource,
) -> Array1<f64> {
    let n = target.len();
    let jrand = rng.uniform_int(n);
    let mut trial = target.to_owned();
    for j in 0..n {
        if j == jrand || rng.unit() < cr {
            trial[j] = mutant[j];
        }
    }
    trial
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_zero_rate_takes_exactly_one_component() {
        let target = array![0.0, 0.0, 0.0, 0.0, 0.0];
        let mutant = array![1.0, 1.0, 1.0, 1.0, 1.0];
        let mut rng = RandomSource::from_seed(8);
        for _ in 0..50 {
            let trial = binomial_crossover(target.view(), &mutant, 0.0, &mut rng);
            assert_eq!(trial.sum(), 1.0);
        }
    }

    #[test]
    fn test_full_rate_takes_mutant() {
        let target = array![0.0, 0.0, 0.0];
        let mutant = array![1.0, 2.0, 3.0];
        let mut rng = RandomSource::from_seed(9);
        assert_eq!(binomial_crossover(target.view(), &mutant, 1.0, &mut rng), mutant);
    }
}
