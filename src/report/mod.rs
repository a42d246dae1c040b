//! Reporting utilities: fit diagnostics and formatted terminal output.
//!
//! Formatting lives here so the math code stays free of presentation.

use nalgebra::{DMatrix, DVector};

use crate::domain::LinearFit;
use crate::error::EstError;

/// In-sample goodness of fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitDiagnostics {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
}

/// Residual sum of squares and RMSE of `fit` on the data it was fitted to.
pub fn compute_diagnostics(
    fit: &LinearFit,
    x: &DMatrix<f64>,
    y: &DVector<f64>,
) -> Result<FitDiagnostics, EstError> {
    let sse = fit.residual_sum_of_squares(x, y)?;
    let n = y.len();
    let rmse = if n > 0 { (sse / n as f64).sqrt() } else { 0.0 };
    Ok(FitDiagnostics { sse, rmse, n })
}

/// Format the coefficient table plus diagnostics.
pub fn format_fit_summary(fit: &LinearFit, covariates: &[String], diag: &FitDiagnostics) -> String {
    let width = covariates
        .iter()
        .map(String::len)
        .chain(std::iter::once("(intercept)".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str("=== est - linear regression (Moore-Penrose) ===\n");
    out.push_str(&format!(
        "Observations: n={} | covariates: p={}\n",
        fit.n_obs,
        fit.n_covariates()
    ));
    out.push_str(&format!(
        "Design rank: {} of {} (tol={:e})\n",
        fit.rank,
        fit.coefficients.len(),
        fit.tolerance
    ));

    out.push_str("\nCoefficients:\n");
    out.push_str(&format!("  {:<width$}  {:>14.8}\n", "(intercept)", fit.intercept()));
    for (name, beta) in covariates.iter().zip(fit.slopes()) {
        out.push_str(&format!("  {name:<width$}  {beta:>14.8}\n"));
    }

    out.push_str(&format!("\nSSE: {:.6e} | RMSE: {:.6e}\n", diag.sse, diag.rmse));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_TOLERANCE;
    use crate::math::fit_linear;

    #[test]
    fn exact_fit_has_zero_error() {
        let x = DMatrix::from_column_slice(3, 1, &[1.0, 2.0, 3.0]);
        let y = DVector::from_row_slice(&[4.0, 5.0, 6.0]);
        let fit = fit_linear(&x, &y, DEFAULT_TOLERANCE).unwrap();

        let diag = compute_diagnostics(&fit, &x, &y).unwrap();
        assert_eq!(diag.n, 3);
        assert!(diag.sse < 1e-20);
        assert!(diag.rmse < 1e-10);
    }

    #[test]
    fn summary_lists_every_coefficient() {
        let x = DMatrix::from_row_slice(4, 2, &[0.0, 1.0, 1.0, 0.0, 2.0, 2.0, 3.0, 1.0]);
        let y = DVector::from_row_slice(&[1.0, 2.5, 5.0, 6.0]);
        let fit = fit_linear(&x, &y, DEFAULT_TOLERANCE).unwrap();
        let diag = compute_diagnostics(&fit, &x, &y).unwrap();

        let names = vec!["age".to_string(), "dose".to_string()];
        let text = format_fit_summary(&fit, &names, &diag);
        assert!(text.contains("(intercept)"));
        assert!(text.contains("age"));
        assert!(text.contains("dose"));
        assert!(text.contains("Design rank: 3 of 3"));
    }
}
