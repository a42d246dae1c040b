//! Command-line parsing for `est`.
//!
//! Argument parsing and command dispatch stay separate from the math code;
//! `app` maps these structs into `domain` configs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::DEFAULT_TOLERANCE;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "est",
    version,
    about = "Uniform sampling, Moore-Penrose pseudoinverse and least-squares regression"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Draw an n x p sample from Uniform[0, 1) and write it as CSV.
    Sample(SampleArgs),
    /// Compute the Moore-Penrose pseudoinverse of a CSV matrix.
    Pinv(PinvArgs),
    /// Fit y ~ 1 + x by least squares and print the coefficients.
    Fit(FitArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Number of rows (observations).
    #[arg(short = 'n', long, default_value_t = 1)]
    pub n: usize,

    /// Number of columns (covariates).
    #[arg(short = 'p', long, default_value_t = 1)]
    pub p: usize,

    /// Seed for a reproducible sample (OS entropy when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write CSV here instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct PinvArgs {
    /// Input matrix CSV.
    #[arg(short = 'i', long, value_name = "CSV")]
    pub input: PathBuf,

    /// Absolute singular value cutoff.
    #[arg(long, default_value_t = DEFAULT_TOLERANCE, value_parser = parse_tolerance)]
    pub tol: f64,

    /// The CSV has no header row.
    #[arg(long)]
    pub no_header: bool,

    /// Write CSV here instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input CSV holding covariates and the response.
    #[arg(short = 'i', long, value_name = "CSV")]
    pub input: PathBuf,

    /// Response column name (defaults to the last column).
    #[arg(short = 'y', long)]
    pub response: Option<String>,

    /// Absolute singular value cutoff.
    #[arg(long, default_value_t = DEFAULT_TOLERANCE, value_parser = parse_tolerance)]
    pub tol: f64,

    /// The CSV has no header row (columns are named x1..xk).
    #[arg(long)]
    pub no_header: bool,

    /// Export the fit (coefficients + metadata) to JSON.
    #[arg(long = "export-fit", value_name = "JSON")]
    pub export_fit: Option<PathBuf>,
}

/// Accept only finite, non-negative singular value cutoffs.
fn parse_tolerance(raw: &str) -> Result<f64, String> {
    let tol: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("'{raw}' is not a number: {e}"))?;
    if !tol.is_finite() || tol < 0.0 {
        return Err(format!("tolerance must be finite and non-negative, got {raw}"));
    }
    Ok(tol)
}
