use ndarray::{Array1, Array2, ArrayView1};

use crate::archive::Archive;
use crate::bounds::Bounds;
use crate::error::{JadeError, Result};
use crate::random::RandomSource;
use crate::ranking::FitnessRanking;

/// Where the `x_r2` donor comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Donor {
    Population(usize),
    Archive(usize),
}

/// Size of the pbest pool: `max(1, floor(n * p))`. A pool covering the
/// whole population is rejected.
pub fn pbest_pool_size(n: usize, p: f64) -> Result<usize> {
    let pool = (n as f64 * p).floor() as usize;
    if n > 0 && pool >= n {
        return Err(JadeError::DegenerateBestFraction { popsize: n, p });
    }
    Ok(pool.max(1))
}

/// Slot of a uniformly chosen member of the top `pool` ranked individuals
pub fn pick_pbest(
    i: usize,
    ranking: &FitnessRanking,
    pool: usize,
    rng: &mut RandomSource,
) -> Result<usize> {
    let pool = pool.min(ranking.len());
    if pool == 0 {
        return Err(JadeError::CandidatesExhausted { what: "pbest", index: i });
    }
    ranking
        .at_rank(rng.uniform_int(pool))
        .map(|r| r.index)
        .ok_or(JadeError::CandidatesExhausted { what: "pbest", index: i })
}

/// Uniform slot in `0..n` other than `i`
pub fn pick_r1(i: usize, n: usize, rng: &mut RandomSource) -> Result<usize> {
    if n < 2 {
        return Err(JadeError::CandidatesExhausted { what: "r1", index: i });
    }
    let j = rng.uniform_int(n - 1);
    Ok(if j >= i { j + 1 } else { j })
}

/// Uniform donor from the population minus `{i, r1}` joined with the archive
pub fn pick_r2(
    i: usize,
    r1: usize,
    n: usize,
    archive_len: usize,
    rng: &mut RandomSource,
) -> Result<Donor> {
    let total = n + archive_len;
    if i == r1 || i >= n || r1 >= n || total <= 2 {
        return Err(JadeError::CandidatesExhausted { what: "r2", index: i });
    }
    // skip the two excluded population slots in increasing order
    let (lo, hi) = if i < r1 { (i, r1) } else { (r1, i) };
    let mut k = rng.uniform_int(total - 2);
    if k >= lo {
        k += 1;
    }
    if k >= hi {
        k += 1;
    }
    Ok(if k < n { Donor::Population(k) } else { Donor::Archive(k - n) })
}

fn donor_row<'a>(
    pop: &'a Array2<f64>,
    archive: &'a Archive,
    donor: Donor,
    i: usize,
) -> Result<ArrayView1<'a, f64>> {
    match donor {
        Donor::Population(k) if k < pop.nrows() => Ok(pop.row(k)),
        Donor::Archive(k) => {
            archive.get(k).ok_or(JadeError::CandidatesExhausted { what: "r2", index: i })
        }
        Donor::Population(_) => Err(JadeError::CandidatesExhausted { what: "r2", index: i }),
    }
}

/// Pull out-of-bounds components halfway back toward the parent:
/// `(upper + x) / 2` above the box, `(lower + x) / 2` below it.
pub fn repair_bounds(v: &mut Array1<f64>, parent: ArrayView1<f64>, bounds: &Bounds) {
    let lower = bounds.lower();
    let upper = bounds.upper();
    for d in 0..v.len() {
        if v[d] > upper[d] {
            v[d] = (upper[d] + parent[d]) / 2.0;
        } else if v[d] < lower[d] {
            v[d] = (lower[d] + parent[d]) / 2.0;
        }
    }
}

/// current-to-pbest/1 with archive:
/// `v = x_i + F (x_pbest - x_i) + F (x_r1 - x_r2)`, then bound repair.
#[allow(clippy::too_many_arguments)]
pub(crate) fn mutant_current_to_pbest1(
    i: usize,
    pop: &Array2<f64>,
    ranking: &FitnessRanking,
    archive: &Archive,
    bounds: &Bounds,
    pool: usize,
    f: f64,
    rng: &mut RandomSource,
) -> Result<Array1<f64>> {
    let n = pop.nrows();
    let pbest = pick_pbest(i, ranking, pool, rng)?;
    let r1 = pick_r1(i, n, rng)?;
    let r2 = pick_r2(i, r1, n, archive.len(), rng)?;

    let x_i = pop.row(i);
    let x_r2 = donor_row(pop, archive, r2, i)?;
    let mut v = &x_i + &((&pop.row(pbest) - &x_i) * f) + &((&pop.row(r1) - &x_r2) * f);
    repair_bounds(&mut v, x_i, bounds);
    Ok(v)
}
