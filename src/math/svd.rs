//! Thin singular value decomposition behind a small trait.
//!
//! The pseudoinverse only needs `A = U Σ Vᵗ`; everything else about how the
//! factors are computed stays behind `Decomposition`, so the thresholding
//! logic can be exercised against hand-built factors in tests.

use nalgebra::{DMatrix, DVector};

use crate::error::EstError;

/// Iteration budget per singular value handed to nalgebra's bidiagonal QR.
const MAX_ITER_PER_VALUE: usize = 100;

/// Reduced SVD factors of an `(m x n)` matrix with `k = min(m, n)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThinSvd {
    /// `(m x k)`, orthonormal columns.
    pub u: DMatrix<f64>,
    /// Length `k`, non-negative, descending.
    pub singular_values: DVector<f64>,
    /// `(k x n)`, orthonormal rows.
    pub v_t: DMatrix<f64>,
}

/// Anything that can factor a dense matrix as `U Σ Vᵗ`.
pub trait Decomposition {
    fn decompose(&self, a: &DMatrix<f64>) -> Result<ThinSvd, EstError>;
}

/// nalgebra-backed decomposition (Householder bidiagonalization + implicit QR).
#[derive(Debug, Clone, Copy, Default)]
pub struct NalgebraSvd;

impl Decomposition for NalgebraSvd {
    fn decompose(&self, a: &DMatrix<f64>) -> Result<ThinSvd, EstError> {
        let (m, n) = a.shape();
        if m == 0 || n == 0 {
            return Ok(ThinSvd {
                u: DMatrix::zeros(m, 0),
                singular_values: DVector::zeros(0),
                v_t: DMatrix::zeros(0, n),
            });
        }

        // NaN/inf never converge; report them instead of burning the budget.
        if let Some(idx) = a.iter().position(|v| !v.is_finite()) {
            return Err(EstError::decomposition(format!(
                "SVD input has a non-finite entry at row {}, column {}.",
                idx % m + 1,
                idx / m + 1
            )));
        }

        let max_niter = MAX_ITER_PER_VALUE * m.min(n);
        let svd = a
            .clone()
            .try_svd(true, true, f64::EPSILON, max_niter)
            .ok_or_else(|| {
                EstError::decomposition(format!("SVD did not converge for a {m} x {n} matrix."))
            })?;

        let u = svd
            .u
            .ok_or_else(|| EstError::decomposition("SVD did not return U."))?;
        let v_t = svd
            .v_t
            .ok_or_else(|| EstError::decomposition("SVD did not return Vᵗ."))?;

        Ok(ThinSvd {
            u,
            singular_values: svd.singular_values,
            v_t,
        })
    }
}
