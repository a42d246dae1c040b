//! Read/write regression fit JSON files.
//!
//! The schema is defined by `domain::FitFile`: coefficients in intercept-first
//! order, the covariate names they belong to, and the numeric settings the
//! fit was made with.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{FitFile, LinearFit};
use crate::error::EstError;

/// Build the portable representation of a fit.
pub fn fit_file(fit: &LinearFit, covariates: &[String]) -> Result<FitFile, EstError> {
    if covariates.len() != fit.n_covariates() {
        return Err(EstError::dimension_mismatch(format!(
            "{} covariate names for a fit with {} covariates",
            covariates.len(),
            fit.n_covariates()
        )));
    }

    Ok(FitFile {
        tool: "est".to_string(),
        generated: Utc::now(),
        tolerance: fit.tolerance,
        n_obs: fit.n_obs,
        rank: fit.rank,
        covariates: covariates.to_vec(),
        coefficients: fit.coefficients.iter().copied().collect(),
    })
}

/// Write a fit JSON file.
pub fn write_fit_json(path: &Path, fit: &LinearFit, covariates: &[String]) -> Result<(), EstError> {
    let doc = fit_file(fit, covariates)?;
    let file = File::create(path)
        .map_err(|e| EstError::io(format!("Failed to create fit JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| EstError::io(format!("Failed to write fit JSON: {e}")))?;

    Ok(())
}

/// Read a fit JSON file.
pub fn read_fit_json(path: &Path) -> Result<FitFile, EstError> {
    let file = File::open(path)
        .map_err(|e| EstError::io(format!("Failed to open fit JSON '{}': {e}", path.display())))?;
    let doc: FitFile =
        serde_json::from_reader(file).map_err(|e| EstError::input(format!("Invalid fit JSON: {e}")))?;

    doc.to_fit()?;
    Ok(doc)
}
