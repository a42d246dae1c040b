//! Numeric CSV matrices.
//!
//! Every cell must parse as a finite `f64`, and every row must have the same width as
//! the header (or as the first row when there is no header). Values are
//! written with Rust's shortest round-trip formatting, so a matrix written by
//! `write_matrix` reads back bit for bit.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use nalgebra::{DMatrix, DVector};

use crate::error::EstError;

/// A dense matrix plus the column names it was read with, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix {
    pub headers: Option<Vec<String>>,
    pub data: DMatrix<f64>,
}

impl LabeledMatrix {
    /// Header names, or `x1..xp` when the input had no header row.
    pub fn column_names(&self) -> Vec<String> {
        match &self.headers {
            Some(h) => h.clone(),
            None => default_column_names(self.data.ncols()),
        }
    }

    /// Split into covariates and a response column.
    ///
    /// `response` is looked up by header name; `None` takes the last column.
    /// Returns `(x, y, covariate_names)`.
    pub fn split_response(
        &self,
        response: Option<&str>,
    ) -> Result<(DMatrix<f64>, DVector<f64>, Vec<String>), EstError> {
        let names = self.column_names();
        let idx = match response {
            Some(name) => names.iter().position(|h| h == name).ok_or_else(|| {
                EstError::input(format!(
                    "Response column '{name}' not found (columns: {}).",
                    names.join(", ")
                ))
            })?,
            None => self
                .data
                .ncols()
                .checked_sub(1)
                .ok_or_else(|| EstError::input("Input has no columns."))?,
        };

        let y = self.data.column(idx).into_owned();
        let x = self.data.clone().remove_column(idx);
        let covariates = names
            .into_iter()
            .enumerate()
            .filter(|(j, _)| *j != idx)
            .map(|(_, name)| name)
            .collect();

        Ok((x, y, covariates))
    }
}

/// `x1, x2, ..., xp`.
pub fn default_column_names(p: usize) -> Vec<String> {
    (1..=p).map(|j| format!("x{j}")).collect()
}

/// Parse a numeric CSV from any reader.
pub fn read_matrix<R: Read>(reader: R, has_headers: bool) -> Result<LabeledMatrix, EstError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = if has_headers {
        let headers = reader
            .headers()
            .map_err(|e| EstError::input(format!("Failed to read CSV headers: {e}")))?;
        Some(headers.iter().map(str::to_string).collect::<Vec<_>>())
    } else {
        None
    };

    let mut width = headers.as_ref().map(Vec::len);
    let mut values = Vec::new();
    let mut nrows = 0usize;
    let first_line = if has_headers { 2 } else { 1 };

    for (idx, result) in reader.records().enumerate() {
        let line = idx + first_line;
        let record =
            result.map_err(|e| EstError::input(format!("CSV parse error on line {line}: {e}")))?;

        match width {
            None => width = Some(record.len()),
            Some(w) if w != record.len() => {
                return Err(EstError::input(format!(
                    "Line {line} has {} fields, expected {w}.",
                    record.len()
                )));
            }
            Some(_) => {}
        }

        for (j, cell) in record.iter().enumerate() {
            let value: f64 = cell.parse().map_err(|_| {
                EstError::input(format!("Line {line}, column {}: '{cell}' is not a number.", j + 1))
            })?;
            if !value.is_finite() {
                return Err(EstError::input(format!(
                    "Line {line}, column {}: '{cell}' is not a finite number.",
                    j + 1
                )));
            }
            values.push(value);
        }
        nrows += 1;
    }

    if nrows == 0 {
        return Err(EstError::input("CSV has no data rows."));
    }
    let ncols = values.len() / nrows;

    Ok(LabeledMatrix {
        headers,
        data: DMatrix::from_row_slice(nrows, ncols, &values),
    })
}

/// Read a numeric CSV file.
pub fn read_matrix_csv(path: &Path, has_headers: bool) -> Result<LabeledMatrix, EstError> {
    let file = File::open(path)
        .map_err(|e| EstError::io(format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_matrix(file, has_headers)
}

/// Write `matrix` as CSV, with an optional header row.
pub fn write_matrix<W: Write>(
    writer: W,
    matrix: &DMatrix<f64>,
    headers: Option<&[String]>,
) -> Result<(), EstError> {
    let mut writer = csv::Writer::from_writer(writer);

    if let Some(headers) = headers {
        writer
            .write_record(headers)
            .map_err(|e| EstError::io(format!("Failed to write CSV header: {e}")))?;
    }

    for row in matrix.row_iter() {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(|e| EstError::io(format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| EstError::io(format!("Failed to flush CSV output: {e}")))?;
    Ok(())
}

/// Write `matrix` as CSV to a file.
pub fn write_matrix_csv(
    path: &Path,
    matrix: &DMatrix<f64>,
    headers: Option<&[String]>,
) -> Result<(), EstError> {
    let file = File::create(path)
        .map_err(|e| EstError::io(format!("Failed to create CSV '{}': {e}", path.display())))?;
    write_matrix(file, matrix, headers)
}
