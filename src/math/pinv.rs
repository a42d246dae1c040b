//! Moore-Penrose pseudoinverse via SVD.
//!
//! ```text
//! A   = U Σ Vᵗ
//! A⁺  = V Σ⁺ Uᵗ,   σᵢ⁺ = 1/σᵢ if σᵢ > τ else 0
//! ```
//!
//! `τ` is an absolute cutoff. It is not scaled by `max(m, n)`, machine epsilon
//! or the largest singular value; callers that want a relative cutoff scale it
//! themselves.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::EstError;
use crate::math::svd::{Decomposition, NalgebraSvd, ThinSvd};

/// Pseudoinverse together with the numerical rank it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct PseudoInverse {
    /// `(n x m)` for an `(m x n)` input.
    pub inverse: DMatrix<f64>,
    /// Number of singular values strictly above the tolerance.
    pub rank: usize,
}

/// Pseudoinverse of `a` using nalgebra's SVD.
pub fn moore_penrose_gen_inv(a: &DMatrix<f64>, tol: f64) -> Result<DMatrix<f64>, EstError> {
    pseudo_inverse_with(&NalgebraSvd, a, tol).map(|p| p.inverse)
}

/// Pseudoinverse of `a` using the given decomposition.
pub fn pseudo_inverse_with<D: Decomposition + ?Sized>(
    decomposer: &D,
    a: &DMatrix<f64>,
    tol: f64,
) -> Result<PseudoInverse, EstError> {
    let (m, n) = a.shape();
    if m == 0 || n == 0 {
        return Ok(PseudoInverse {
            inverse: DMatrix::zeros(n, m),
            rank: 0,
        });
    }

    let ThinSvd {
        u,
        singular_values,
        v_t,
    } = decomposer.decompose(a)?;
    check_factor_shapes(m, n, &u, &singular_values, &v_t)?;

    let s_inv = invert_singular_values(&singular_values, tol);
    let rank = singular_values.iter().filter(|&&s| s > tol).count();

    // V Σ⁺ Uᵗ == (Vᵗ)ᵗ (Σ⁺ Uᵗ)
    let inverse = v_t.tr_mul(&(DMatrix::from_diagonal(&s_inv) * u.transpose()));

    debug!(
        "pseudoinverse {m}x{n}: rank {rank}, {} singular value(s) at or below tol={tol:e}",
        singular_values.len() - rank
    );

    Ok(PseudoInverse { inverse, rank })
}

/// `1/σ` for every singular value strictly above `tol`, exactly `0.0` otherwise.
pub fn invert_singular_values(singular_values: &DVector<f64>, tol: f64) -> DVector<f64> {
    singular_values.map(|s| if s > tol { 1.0 / s } else { 0.0 })
}

fn check_factor_shapes(
    m: usize,
    n: usize,
    u: &DMatrix<f64>,
    singular_values: &DVector<f64>,
    v_t: &DMatrix<f64>,
) -> Result<(), EstError> {
    let k = singular_values.len();
    if u.shape() != (m, k) || v_t.shape() != (k, n) {
        return Err(EstError::decomposition(format!(
            "Inconsistent SVD factors for a {m} x {n} matrix: U is {:?}, Σ has {k} values, Vᵗ is {:?}.",
            u.shape(),
            v_t.shape()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{rand_multivariate_uniform, sample_rng};
    use crate::domain::DEFAULT_TOLERANCE;
    use crate::error::ErrorKind;

    /// Returns the same factors whatever it is asked to decompose.
    struct FixedFactors(ThinSvd);

    impl Decomposition for FixedFactors {
        fn decompose(&self, _a: &DMatrix<f64>) -> Result<ThinSvd, EstError> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl Decomposition for Failing {
        fn decompose(&self, _a: &DMatrix<f64>) -> Result<ThinSvd, EstError> {
            Err(EstError::decomposition("no convergence"))
        }
    }

    fn max_abs_diff(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
        (a - b).amax()
    }

    #[test]
    fn identity_is_its_own_pseudoinverse() {
        let eye = DMatrix::<f64>::identity(3, 3);
        let pinv = moore_penrose_gen_inv(&eye, DEFAULT_TOLERANCE).unwrap();
        assert!(max_abs_diff(&pinv, &eye) < 1e-12);
    }

    #[test]
    fn rectangular_matrix_satisfies_a_pinv_a() {
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let pinv = moore_penrose_gen_inv(&a, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(pinv.shape(), (2, 3));
        assert!(max_abs_diff(&(&a * &pinv * &a), &a) < 1e-10);
    }

    #[test]
    fn wide_matrix_satisfies_all_four_conditions() {
        let a = DMatrix::from_row_slice(2, 3, &[2.0, -1.0, 0.5, 1.0, 3.0, -2.0]);
        let p = moore_penrose_gen_inv(&a, DEFAULT_TOLERANCE).unwrap();

        let ap = &a * &p;
        let pa = &p * &a;
        assert!(max_abs_diff(&(&ap * &a), &a) < 1e-10);
        assert!(max_abs_diff(&(&pa * &p), &p) < 1e-10);
        assert!(max_abs_diff(&ap, &ap.transpose()) < 1e-10);
        assert!(max_abs_diff(&pa, &pa.transpose()) < 1e-10);
    }

    #[test]
    fn singular_matrix_still_inverts() {
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
        let p = pseudo_inverse_with(&NalgebraSvd, &a, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(p.inverse.shape(), (2, 3));
        assert_eq!(p.rank, 1);
        assert!(max_abs_diff(&(&a * &p.inverse * &a), &a) < 1e-10);
    }

    #[test]
    fn tiny_singular_value_is_dropped() {
        let a = DMatrix::from_row_slice(2, 2, &[1e-13, 0.0, 0.0, 1.0]);
        let p = pseudo_inverse_with(&NalgebraSvd, &a, 1e-12).unwrap();
        let expected = DMatrix::from_row_slice(2, 2, &[0.0, 0.0, 0.0, 1.0]);
        assert!(max_abs_diff(&p.inverse, &expected) < 1e-12);
        assert_eq!(p.rank, 1);
    }

    #[test]
    fn thresholded_direction_is_exactly_zero() {
        let factors = ThinSvd {
            u: DMatrix::identity(2, 2),
            singular_values: DVector::from_row_slice(&[1.0, 1e-13]),
            v_t: DMatrix::identity(2, 2),
        };
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1e-13]);
        let p = pseudo_inverse_with(&FixedFactors(factors), &a, 1e-12).unwrap();

        assert_eq!(p.inverse, DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 0.0]));
        assert_eq!(p.rank, 1);
    }

    #[test]
    fn cutoff_is_strict_and_absolute() {
        let s = DVector::from_row_slice(&[4.0, 1e-12, 5e-13, 0.0]);
        let inv = invert_singular_values(&s, 1e-12);
        assert_eq!(inv[0], 0.25);
        assert_eq!(inv[1], 0.0);
        assert_eq!(inv[2], 0.0);
        assert_eq!(inv[3], 0.0);

        // No rescaling by the largest value: 1e-10 survives next to 1e10.
        let wide = DVector::from_row_slice(&[1e10, 1e-10]);
        let inv = invert_singular_values(&wide, 1e-12);
        assert!((inv[1] - 1e10).abs() < 1.0);
    }

    #[test]
    fn zero_matrix_maps_to_zero() {
        let a = DMatrix::<f64>::zeros(3, 2);
        let p = pseudo_inverse_with(&NalgebraSvd, &a, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(p.inverse, DMatrix::zeros(2, 3));
        assert_eq!(p.rank, 0);
    }

    #[test]
    fn empty_matrix_skips_the_decomposer() {
        let a = DMatrix::<f64>::zeros(0, 4);
        let p = pseudo_inverse_with(&Failing, &a, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(p.inverse.shape(), (4, 0));
        assert_eq!(p.rank, 0);
    }

    #[test]
    fn decomposer_failure_propagates() {
        let a = DMatrix::<f64>::identity(2, 2);
        let err = pseudo_inverse_with(&Failing, &a, DEFAULT_TOLERANCE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decomposition);
    }

    #[test]
    fn mis_shaped_factors_are_rejected() {
        let factors = ThinSvd {
            u: DMatrix::identity(3, 2),
            singular_values: DVector::from_row_slice(&[1.0, 1.0]),
            v_t: DMatrix::identity(2, 2),
        };
        let a = DMatrix::<f64>::identity(2, 2);
        let err = pseudo_inverse_with(&FixedFactors(factors), &a, DEFAULT_TOLERANCE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decomposition);
    }

    #[test]
    fn random_matrices_reconstruct() {
        for seed in 0..10_u64 {
            let mut rng = sample_rng(Some(seed));
            let a = rand_multivariate_uniform(&mut rng, 6, 4).unwrap();
            let p = moore_penrose_gen_inv(&a, DEFAULT_TOLERANCE).unwrap();
            assert!(
                max_abs_diff(&(&a * &p * &a), &a) < 1e-10,
                "seed {seed} failed A A⁺ A = A"
            );
        }
    }
}
