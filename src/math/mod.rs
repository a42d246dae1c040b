//! Dense linear algebra: SVD seam, Moore-Penrose pseudoinverse and the
//! least-squares regression built on it.

pub mod ols;
pub mod pinv;
pub mod svd;

pub use ols::*;
pub use pinv::*;
pub use svd::*;
