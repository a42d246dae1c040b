//! Shared domain types.
//!
//! Run configurations are plain structs filled from CLI flags (plus defaults);
//! fit outputs are kept serializable so they can be exported to JSON and
//! reloaded later.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::EstError;

/// Absolute cutoff below which a singular value is treated as zero.
///
/// Never scaled by the largest singular value or the matrix shape.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Shape and seed of a uniform sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Number of rows (observations).
    pub n: usize,
    /// Number of columns (covariates).
    pub p: usize,
    /// `None` draws from an entropy-seeded generator.
    pub seed: Option<u64>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            n: 1,
            p: 1,
            seed: None,
        }
    }
}

/// Configuration for `est pinv`.
#[derive(Debug, Clone)]
pub struct PinvConfig {
    pub input: PathBuf,
    pub has_headers: bool,
    pub tolerance: f64,
    pub output: Option<PathBuf>,
}

/// Configuration for `est fit`.
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub input: PathBuf,
    pub has_headers: bool,
    /// Response column name; the last column when `None`.
    pub response: Option<String>,
    pub tolerance: f64,
    pub export_fit: Option<PathBuf>,
}

/// Least-squares coefficients of `y = b0 + b1 x1 + ... + bp xp`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFit {
    /// Length `p + 1`; the intercept comes first.
    pub coefficients: DVector<f64>,
    /// Number of observations used in the fit.
    pub n_obs: usize,
    /// Numerical rank of the design matrix at `tolerance`.
    pub rank: usize,
    pub tolerance: f64,
}

/// A saved regression fit (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub tolerance: f64,
    pub n_obs: usize,
    pub rank: usize,
    /// Covariate names in coefficient order (intercept excluded).
    pub covariates: Vec<String>,
    pub coefficients: Vec<f64>,
}

impl FitFile {
    /// Rebuild the fit; needs an intercept plus one coefficient per covariate.
    pub fn to_fit(&self) -> Result<LinearFit, EstError> {
        if self.coefficients.len() != self.covariates.len() + 1 {
            return Err(EstError::input(format!(
                "Fit has {} coefficients for {} covariates (expected intercept + one per covariate).",
                self.coefficients.len(),
                self.covariates.len()
            )));
        }
        Ok(LinearFit {
            coefficients: DVector::from_vec(self.coefficients.clone()),
            n_obs: self.n_obs,
            rank: self.rank,
            tolerance: self.tolerance,
        })
    }
}
