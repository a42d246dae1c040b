//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs the logger
//! - parses CLI arguments
//! - runs the requested computation
//! - prints results and writes optional exports

use std::path::Path;

use clap::Parser;
use log::info;
use nalgebra::DMatrix;

use crate::cli::{Command, FitArgs, PinvArgs, SampleArgs};
use crate::domain::{FitConfig, PinvConfig, SampleConfig};
use crate::error::EstError;
use crate::io::{default_column_names, write_matrix, write_matrix_csv};

pub mod pipeline;

/// Entry point for the `est` binary.
pub fn run() -> Result<(), EstError> {
    crate::logging::init_from_env();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Sample(args) => handle_sample(&args),
        Command::Pinv(args) => handle_pinv(&args),
        Command::Fit(args) => handle_fit(&args),
    }
}

fn handle_sample(args: &SampleArgs) -> Result<(), EstError> {
    let config = sample_config_from_args(args);
    let sample = crate::data::generate_sample(&config)?;
    info!("generated {}x{} uniform sample (seed {:?})", config.n, config.p, config.seed);

    let headers = default_column_names(config.p);
    write_output(args.output.as_deref(), &sample, Some(headers.as_slice()))
}

fn handle_pinv(args: &PinvArgs) -> Result<(), EstError> {
    let config = pinv_config_from_args(args);
    let run = pipeline::run_pinv(&config)?;

    // Columns of A⁺ follow the rows of A, so input headers do not carry over.
    write_output(config.output.as_deref(), &run.inverse, None)
}

fn handle_fit(args: &FitArgs) -> Result<(), EstError> {
    let config = fit_config_from_args(args);
    let run = pipeline::run_fit(&config)?;

    println!(
        "{}",
        crate::report::format_fit_summary(&run.fit, &run.covariates, &run.diagnostics)
    );

    if let Some(path) = &config.export_fit {
        crate::io::write_fit_json(path, &run.fit, &run.covariates)?;
        info!("wrote fit JSON to {}", path.display());
    }

    Ok(())
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        n: args.n,
        p: args.p,
        seed: args.seed,
    }
}

pub fn pinv_config_from_args(args: &PinvArgs) -> PinvConfig {
    PinvConfig {
        input: args.input.clone(),
        has_headers: !args.no_header,
        tolerance: args.tol,
        output: args.output.clone(),
    }
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        input: args.input.clone(),
        has_headers: !args.no_header,
        response: args.response.clone(),
        tolerance: args.tol,
        export_fit: args.export_fit.clone(),
    }
}

fn write_output(path: Option<&Path>, matrix: &DMatrix<f64>, headers: Option<&[String]>) -> Result<(), EstError> {
    match path {
        Some(path) => {
            write_matrix_csv(path, matrix, headers)?;
            info!("wrote {}x{} matrix to {}", matrix.nrows(), matrix.ncols(), path.display());
            Ok(())
        }
        None => write_matrix(std::io::stdout().lock(), matrix, headers),
    }
}
