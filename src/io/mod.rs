//! Input/output helpers.
//!
//! - numeric CSV matrices (`matrix`)
//! - regression fit JSON read/write (`fit`)

pub mod fit;
pub mod matrix;

pub use fit::*;
pub use matrix::*;
