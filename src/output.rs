//! The module responsible for writing output data to disk.
use crate::material::MaterialSample;
use crate::sweep::OpticalResult;
use anyhow::{Context, Result, ensure};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The stem of the results file name
const RESULT_FILE_STEM: &str = "result";

/// The extension of the results file name
const RESULT_FILE_EXTENSION: &str = "csv";

/// The column headers of the results file
const RESULT_COLUMNS: [&str; 4] = [
    "Wavelength(um)",
    "n",
    "k1 (Urbach Zone)",
    "k2 (Intrinsic Zone)",
];

/// Find a path in `dir` that does not already exist.
///
/// The first candidate is `{stem}.{extension}`. If that is taken, `{stem}1.{extension}`,
/// `{stem}2.{extension}` and so on are tried in turn. Existing files are never overwritten.
///
/// NB: Another process could create the file between this check and the subsequent write.
pub fn unique_file_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    let mut path = dir.join(format!("{stem}.{extension}"));
    let mut index = 1u32;
    while path.exists() {
        path = dir.join(format!("{stem}{index}.{extension}"));
        index += 1;
    }

    path
}

/// Create the output directory if it doesn't already exist
pub fn create_output_directory(output_dir: &Path) -> Result<()> {
    if output_dir.is_dir() {
        // already exists
        return Ok(());
    }

    // Try to create the directory, with parents
    fs::create_dir_all(output_dir)?;

    Ok(())
}

/// Represents a data row in the results file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct ResultRow {
    wavelength: f64,
    n: f64,
    k1: f64,
    k2: f64,
}

/// Write the results of a calculation to a new CSV file in `output_dir`.
///
/// The first row records the sample's composition and temperature, the second names the columns
/// and the remaining rows hold one wavelength each.
///
/// # Returns
///
/// The path of the file that was written
pub fn write_results(
    output_dir: &Path,
    sample: &MaterialSample,
    result: &OpticalResult,
) -> Result<PathBuf> {
    let file_path = unique_file_path(output_dir, RESULT_FILE_STEM, RESULT_FILE_EXTENSION);
    write_results_to_path(&file_path, sample, result)
        .with_context(|| format!("Failed to write results to {}", file_path.display()))?;

    Ok(file_path)
}

/// Write the results file to the given path
fn write_results_to_path(
    file_path: &Path,
    sample: &MaterialSample,
    result: &OpticalResult,
) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(file_path)?;

    writer.write_record([
        format!("x={}", sample.x),
        format!("temp={}", sample.temperature.value()),
    ])?;
    writer.write_record(RESULT_COLUMNS)?;
    for (wavelength, n, k1, k2) in result.rows() {
        writer.serialize(ResultRow {
            wavelength,
            n,
            k1,
            k2,
        })?;
    }
    writer.flush()?;

    Ok(())
}

/// The contents of a results file
#[derive(Debug, PartialEq)]
pub struct ResultFile {
    /// Cadmium fraction recorded in the file
    pub x: f64,
    /// Temperature (K) recorded in the file
    pub temperature: f64,
    /// The tabulated optical constants
    pub result: OpticalResult,
}

/// Parse a `key=value` metadata field from the first row of a results file
fn parse_metadata_field(field: Option<&str>, key: &str) -> Result<f64> {
    let field = field.with_context(|| format!("Missing '{key}' field"))?;
    let value = field
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('='))
        .with_context(|| format!("Expected '{key}=<value>', found '{field}'"))?;

    value
        .parse()
        .with_context(|| format!("Invalid value for '{key}': {value}"))
}

/// Read a results file previously written by [`write_results`]
pub fn read_results(file_path: &Path) -> Result<ResultFile> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(file_path)
        .with_context(|| format!("Failed to open {}", file_path.display()))?;
    let mut records = reader.records();

    let metadata = records.next().context("Results file is empty")??;
    let x = parse_metadata_field(metadata.get(0), "x")?;
    let temperature = parse_metadata_field(metadata.get(1), "temp")?;

    let columns = records.next().context("Results file has no header row")??;
    ensure!(
        columns.iter().eq(RESULT_COLUMNS),
        "Unexpected column headers: {:?}",
        columns
    );

    let mut result = OpticalResult::with_capacity(0);
    for record in records {
        let row: ResultRow = record?.deserialize(None)?;
        result.push(row.wavelength, row.n, row.k1, row.k2);
    }

    Ok(ResultFile {
        x,
        temperature,
        result,
    })
}
