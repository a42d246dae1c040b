//! Uniform multivariate sample generation.
//!
//! Every cell is an independent draw from `Uniform[0, 1)`, so the rows are
//! points spread uniformly over the unit hypercube `[0, 1]^p`.
//!
//! The generator is always owned by the caller. Reproducibility comes from
//! seeding that generator (`sample_rng(Some(seed))`), never from process-wide
//! state, so concurrent callers cannot disturb each other's streams.

use log::debug;
use nalgebra::DMatrix;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Uniform;

use crate::domain::SampleConfig;
use crate::error::EstError;

/// Draw an `(n x p)` matrix of independent `Uniform[0, 1)` values.
///
/// Cells are filled row by row, so the first `p` draws from `rng` form row 0.
pub fn rand_multivariate_uniform<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    p: usize,
) -> Result<DMatrix<f64>, EstError> {
    if n == 0 || p == 0 {
        return Err(EstError::invalid_size(format!(
            "n and p must be positive integers (got n={n}, p={p})"
        )));
    }
    let cells = n
        .checked_mul(p)
        .ok_or_else(|| EstError::invalid_size(format!("Sample of {n} x {p} cells is too large.")))?;

    let unit = Uniform::new(0.0, 1.0);
    let sample = DMatrix::from_row_iterator(n, p, (0..cells).map(|_| unit.sample(&mut *rng)));
    debug!("drew uniform sample n={n} p={p}");
    Ok(sample)
}

/// Build the generator for a sample: seeded when `seed` is given, from OS
/// entropy otherwise.
pub fn sample_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generate a sample from a config, with a fresh generator per call.
pub fn generate_sample(config: &SampleConfig) -> Result<DMatrix<f64>, EstError> {
    let mut rng = sample_rng(config.seed);
    rand_multivariate_uniform(&mut rng, config.n, config.p)
}
