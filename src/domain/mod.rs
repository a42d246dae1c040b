//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - numeric defaults (`DEFAULT_TOLERANCE`)
//! - run configurations (`SampleConfig`, `PinvConfig`, `FitConfig`)
//! - fit outputs (`LinearFit`, `FitFile`)

pub mod types;

pub use types::*;
