//! Loading observations and ground-truth labels from comma-separated files.
//!
//! Files have no header. Every non-blank line is one record; empty fields
//! between consecutive commas are skipped, so `1,,2` is the record `[1, 2]`.

use crate::dataset::Dataset;
use crate::error::{KMeansError, Result};
use crate::vector::Vector;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Read one observation per line.
///
/// # Errors
///
/// Returns an error if:
/// - `path` does not resolve (`FileNotFound`)
/// - A field is not a finite real number, including `nan` and `inf` (`Parse`)
/// - Lines have different numbers of fields (`DimensionMismatch`)
/// - The file holds no records (`InvalidConfiguration`)
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let rows = read_rows(open(path.as_ref())?)?;
    let observations: Vec<Vector> = rows
        .into_iter()
        .map(|(_, values)| Vector::from(values))
        .collect();

    tracing::debug!(path = %path.as_ref().display(), n = observations.len(), "loaded observations");
    Dataset::new(observations)
}

/// Read one integer label per line from the first field.
///
/// Labels such as `1.0` are accepted; `0.5` or `-1` are parse errors.
pub fn read_labels<P: AsRef<Path>>(path: P) -> Result<Vec<usize>> {
    let rows = read_rows(open(path.as_ref())?)?;

    let labels = rows
        .into_iter()
        .map(|(line, values)| {
            let value = values[0];
            if value.fract() != 0.0 || value < 0.0 || !value.is_finite() {
                return Err(KMeansError::Parse {
                    line,
                    token: value.to_string(),
                });
            }
            Ok(value as usize)
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(path = %path.as_ref().display(), n = labels.len(), "loaded labels");
    Ok(labels)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => KMeansError::FileNotFound(path.to_path_buf()),
        _ => KMeansError::Io(err),
    })
}

/// Parse every non-blank record into (1-based line number, values).
fn read_rows<R: Read>(reader: R) -> Result<Vec<(usize, Vec<f64>)>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut record = StringRecord::new();

    while rdr.read_record(&mut record)? {
        let line = record.position().map_or(rows.len() + 1, |p| p.line() as usize);

        let values = record
            .iter()
            .filter(|field| !field.is_empty())
            .map(|field| match field.parse::<f64>() {
                // `nan` and `inf` parse as f64 but are not real numbers
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(KMeansError::Parse {
                    line,
                    token: field.to_string(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        if !values.is_empty() {
            rows.push((line, values));
        }
    }

    Ok(rows)
}
