//! `est-stats` library crate.
//!
//! Three numeric building blocks over `nalgebra`:
//!
//! - uniform multivariate samples from a caller-owned RNG (`data`)
//! - the Moore-Penrose pseudoinverse with an absolute singular value cutoff (`math::pinv`)
//! - least-squares regression coefficients built on it (`math::ols`)
//!
//! The binary (`est`) is a thin wrapper around this library.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod report;

pub use data::{generate_sample, rand_multivariate_uniform, sample_rng};
pub use domain::{DEFAULT_TOLERANCE, LinearFit, SampleConfig};
pub use error::{ErrorKind, EstError};
pub use math::{
    Decomposition, NalgebraSvd, PseudoInverse, ThinSvd, betas_linreg_moore_penrose, fit_linear,
    moore_penrose_gen_inv, pseudo_inverse_with,
};
