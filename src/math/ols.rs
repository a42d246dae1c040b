//! Linear regression through the pseudoinverse.
//!
//! ```text
//! D = [1 | X]          (n x (p+1) design matrix)
//! β = D⁺ y
//! ```
//!
//! When `D` has full column rank this is the ordinary least-squares solution.
//! When columns are collinear the truncated singular directions contribute
//! nothing, and `β` is the minimum-norm vector among all least-squares
//! solutions. Rank deficiency is therefore logged, not rejected.

use log::warn;
use nalgebra::{DMatrix, DVector};

use crate::domain::LinearFit;
use crate::error::EstError;
use crate::math::pinv::pseudo_inverse_with;
use crate::math::svd::{Decomposition, NalgebraSvd};

/// Prepend a column of ones (intercept) to `x`.
pub fn design_matrix(x: &DMatrix<f64>) -> DMatrix<f64> {
    x.clone().insert_column(0, 1.0)
}

/// Regression coefficients `[intercept, slope_1, ..., slope_p]`.
pub fn betas_linreg_moore_penrose(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    tol: f64,
) -> Result<DVector<f64>, EstError> {
    fit_linear(x, y, tol).map(|fit| fit.coefficients)
}

/// Fit `y ~ 1 + x` with nalgebra's SVD.
pub fn fit_linear(x: &DMatrix<f64>, y: &DVector<f64>, tol: f64) -> Result<LinearFit, EstError> {
    fit_linear_with(&NalgebraSvd, x, y, tol)
}

/// Fit `y ~ 1 + x` with the given decomposition.
pub fn fit_linear_with<D: Decomposition + ?Sized>(
    decomposer: &D,
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    tol: f64,
) -> Result<LinearFit, EstError> {
    ensure_same_observations(x, y)?;

    let design = design_matrix(x);
    let pinv = pseudo_inverse_with(decomposer, &design, tol)?;
    let coefficients = &pinv.inverse * y;

    if pinv.rank < design.ncols() {
        warn!(
            "design matrix is rank deficient (rank {} of {} columns); returning the minimum-norm solution",
            pinv.rank,
            design.ncols()
        );
    }

    Ok(LinearFit {
        coefficients,
        n_obs: x.nrows(),
        rank: pinv.rank,
        tolerance: tol,
    })
}

fn ensure_same_observations(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<(), EstError> {
    if x.nrows() != y.len() {
        return Err(EstError::dimension_mismatch(format!(
            "x and y must have the same number of observations (x has {} rows, y has {})",
            x.nrows(),
            y.len()
        )));
    }
    Ok(())
}

// Every constructor (`fit_linear_with`, `FitFile::to_fit`) guarantees at
// least the intercept coefficient.
impl LinearFit {
    pub fn intercept(&self) -> f64 {
        self.coefficients[0]
    }

    /// Slopes in covariate column order.
    pub fn slopes(&self) -> &[f64] {
        &self.coefficients.as_slice()[1..]
    }

    pub fn n_covariates(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Fitted values `[1 | x] β` for new covariate rows.
    pub fn predict(&self, x: &DMatrix<f64>) -> Result<DVector<f64>, EstError> {
        if x.ncols() != self.n_covariates() {
            return Err(EstError::dimension_mismatch(format!(
                "x has {} columns but the fit has {} covariates",
                x.ncols(),
                self.n_covariates()
            )));
        }
        Ok(design_matrix(x) * &self.coefficients)
    }

    /// `y - ŷ` on the given observations.
    pub fn residuals(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, EstError> {
        ensure_same_observations(x, y)?;
        Ok(y - self.predict(x)?)
    }

    pub fn residual_sum_of_squares(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<f64, EstError> {
        Ok(self.residuals(x, y)?.norm_squared())
    }
}
