//! Common routines for reading model data files.
//!
//! Data files use the sets/parameters notation of the optimisation model, e.g.:
//!
//! ```text
//! set L[1] := H1 H2 H3 ;
//! param: I: W :=
//!   o1 120
//!   o2 80 ;
//! param C1 :=
//!   H1 900 ;
//! ```
//!
//! Sections are located by their headers. Malformed rows inside a section are skipped and missing
//! sections leave the corresponding collection empty, so that whatever partial data is present
//! can still be checked.
use crate::model::ModelData;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

mod params;
mod sets;

/// Format an error message to include the file path. To be used with `anyhow::Context`.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Read the contents of all the given data files into a single [`ModelData`].
///
/// All files are read before any data are extracted, so a missing file is reported before
/// anything else happens.
///
/// # Arguments
///
/// * `file_paths` - Paths to the data files, in the order they should be applied
pub fn read_data_files<P: AsRef<Path>>(file_paths: &[P]) -> Result<ModelData> {
    let contents = file_paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            fs::read_to_string(path).with_context(|| input_err_msg(path))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut data = ModelData::default();
    for (path, content) in file_paths.iter().zip(&contents) {
        info!("Loading data from {}", path.as_ref().display());
        parse_data(content, &mut data);
    }

    Ok(data)
}

/// Extract sets and parameters from the text of a data file, adding them to `data`.
///
/// Calling this repeatedly with different texts is additive: sets are extended and later values
/// replace earlier ones for the same key.
pub fn parse_data(content: &str, data: &mut ModelData) {
    sets::read_sets(content, data);
    params::read_demand(content, data);
    params::read_capacities(content, data);
    params::read_step_down_ratios(content, data);
    params::read_max_distances(content, data);
    params::read_distances(content, data);

    debug!(
        "Data so far: {} origins, {} demand entries",
        data.origins.len(),
        data.demand.len()
    );
}

/// Try to read a row of the form `id value ...`, taking the value from the given column.
///
/// Column 0 is the first column after the ID. Returns `None` if the row is too short or the value
/// is not a finite number (`NaN` and `inf` are rejected).
fn parse_row(line: &str, column: usize) -> Option<(&str, f64)> {
    let mut parts = line.split_whitespace();
    let id = parts.next()?;
    let value = parts
        .nth(column)?
        .parse()
        .ok()
        .filter(|value: &f64| value.is_finite())?;

    Some((id, value))
}

/// Iterate over the well-formed rows of a section body
fn parse_rows(body: &str, column: usize) -> impl Iterator<Item = (&str, f64)> {
    body.lines().filter_map(move |line| parse_row(line, column))
}
