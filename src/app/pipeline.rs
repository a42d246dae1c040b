//! Shared run logic behind `est pinv` and `est fit`.
//!
//! Each function reads its input, computes, and returns everything the
//! front end prints or exports, so the workflow is testable without
//! capturing stdout.

use log::info;
use nalgebra::DMatrix;

use crate::domain::{FitConfig, LinearFit, PinvConfig};
use crate::error::EstError;
use crate::io::read_matrix_csv;
use crate::math::{NalgebraSvd, fit_linear_with, pseudo_inverse_with};
use crate::report::{FitDiagnostics, compute_diagnostics};

/// Outputs of a single `est pinv` run.
#[derive(Debug, Clone)]
pub struct PinvRun {
    pub inverse: DMatrix<f64>,
    pub rank: usize,
}

/// Outputs of a single `est fit` run.
#[derive(Debug, Clone)]
pub struct FitRun {
    pub fit: LinearFit,
    pub covariates: Vec<String>,
    pub diagnostics: FitDiagnostics,
}

pub fn run_pinv(config: &PinvConfig) -> Result<PinvRun, EstError> {
    let input = read_matrix_csv(&config.input, config.has_headers)?;
    let (m, n) = input.data.shape();

    let pinv = pseudo_inverse_with(&NalgebraSvd, &input.data, config.tolerance)?;
    info!("pseudoinverse of {m}x{n} matrix has rank {}", pinv.rank);

    Ok(PinvRun {
        inverse: pinv.inverse,
        rank: pinv.rank,
    })
}

pub fn run_fit(config: &FitConfig) -> Result<FitRun, EstError> {
    let input = read_matrix_csv(&config.input, config.has_headers)?;
    let (x, y, covariates) = input.split_response(config.response.as_deref())?;

    let fit = fit_linear_with(&NalgebraSvd, &x, &y, config.tolerance)?;
    let diagnostics = compute_diagnostics(&fit, &x, &y)?;
    info!(
        "fitted {} covariate(s) on {} observations, rank {}",
        fit.n_covariates(),
        fit.n_obs,
        fit.rank
    );

    Ok(FitRun {
        fit,
        covariates,
        diagnostics,
    })
}
