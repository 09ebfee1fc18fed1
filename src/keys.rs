//! Code for generating coordinate join keys for tabular data.
//!
//! Latitudes and longitudes are rounded to 6 decimal places and combined into a text key of the
//! form `<lat>_<long>`, so that tables of sites and of origin/destination pairs can be joined on
//! location.
use anyhow::{Context, Result, ensure};
use clap::ValueEnum;
use csv::{ReaderBuilder, StringRecord, Writer};
use log::info;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Number of decimal places coordinates are rounded to
const COORDINATE_PRECISION: i32 = 6;

/// A key column built from a pair of coordinate columns
#[derive(Debug, PartialEq)]
struct KeyColumns {
    /// Name of the key column
    key: &'static str,
    /// Name of the latitude column
    lat: &'static str,
    /// Name of the longitude column
    long: &'static str,
}

/// The layout of the table to add keys to
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyLayout {
    /// A table of sites with `Lat` and `Long` columns, keyed as `lat_long`
    Sites,
    /// A table of journeys with `Lat_ori`, `Long_ori`, `Lat_dest` and `Long_dest` columns, keyed
    /// as `origin` and `destination`
    #[value(name = "od")]
    OriginDestination,
}

impl KeyLayout {
    /// The key columns to generate for this layout
    fn key_columns(self) -> &'static [KeyColumns] {
        match self {
            Self::Sites => &[KeyColumns {
                key: "lat_long",
                lat: "Lat",
                long: "Long",
            }],
            Self::OriginDestination => &[
                KeyColumns {
                    key: "origin",
                    lat: "Lat_ori",
                    long: "Long_ori",
                },
                KeyColumns {
                    key: "destination",
                    lat: "Lat_dest",
                    long: "Long_dest",
                },
            ],
        }
    }
}

/// Round a coordinate and format it as text.
///
/// Whole numbers keep a trailing `.0` (e.g. `10.0`) so that keys look the same whatever the
/// coordinate.
pub fn format_coordinate(value: f64) -> String {
    let scale = 10f64.powi(COORDINATE_PRECISION);
    let rounded = (value * scale).round() / scale;
    let text = rounded.to_string();
    if rounded.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

/// Build the join key for a location
pub fn coordinate_key(lat: f64, long: f64) -> String {
    format!("{}_{}", format_coordinate(lat), format_coordinate(long))
}

/// Find the index of the named column
fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .with_context(|| format!("Missing column {name}"))
}

/// Add coordinate keys to CSV data read from `reader`, writing the result to `writer`.
///
/// Coordinate columns are rewritten rounded. Key columns are appended, or overwritten if they are
/// already present.
///
/// # Returns
///
/// The number of rows written.
pub fn add_coordinate_keys<R: Read, W: Write>(
    reader: R,
    writer: W,
    layout: KeyLayout,
) -> Result<usize> {
    let mut reader = ReaderBuilder::new().from_reader(reader);
    let mut headers = reader.headers()?.clone();

    // Indices of the key, latitude and longitude columns
    let mut columns = Vec::new();
    for cols in layout.key_columns() {
        let lat = column_index(&headers, cols.lat)?;
        let long = column_index(&headers, cols.long)?;
        let key = if let Ok(key) = column_index(&headers, cols.key) {
            key
        } else {
            headers.push_field(cols.key);
            headers.len() - 1
        };
        columns.push((cols, lat, long, key));
    }

    let mut writer = Writer::from_writer(writer);
    writer.write_record(&headers)?;

    let mut rows = 0;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let mut fields: Vec<String> = record.iter().map(ToString::to_string).collect();
        fields.resize(headers.len(), String::new());

        for (cols, lat, long, key) in &columns {
            let parse = |index: usize, name: &str| -> Result<f64> {
                fields[index].trim().parse().with_context(|| {
                    format!("Invalid value for column {name} on row {}", row + 1)
                })
            };
            let lat_value = parse(*lat, cols.lat)?;
            let long_value = parse(*long, cols.long)?;

            fields[*lat] = format_coordinate(lat_value);
            fields[*long] = format_coordinate(long_value);
            fields[*key] = coordinate_key(lat_value, long_value);
        }

        writer.write_record(&fields)?;
        rows += 1;
    }
    writer.flush()?;

    Ok(rows)
}

/// Add coordinate keys to the CSV file at `input_path`, saving the result to `output_path`.
///
/// # Arguments
///
/// * `input_path` - The CSV file to read
/// * `output_path` - Where to write the new CSV file
/// * `layout` - Which coordinate columns the file has
/// * `overwrite` - Whether to replace `output_path` if it already exists
pub fn write_coordinate_keys(
    input_path: &Path,
    output_path: &Path,
    layout: KeyLayout,
    overwrite: bool,
) -> Result<()> {
    ensure!(
        input_path != output_path,
        "Input and output files must be different"
    );
    ensure!(
        overwrite || !output_path.exists(),
        "Output file {} already exists (use --overwrite to replace it)",
        output_path.display()
    );

    let input = File::open(input_path)
        .with_context(|| format!("Could not open {}", input_path.display()))?;
    let output = File::create(output_path)
        .with_context(|| format!("Could not create {}", output_path.display()))?;

    let rows = add_coordinate_keys(input, output, layout)
        .with_context(|| format!("Error processing {}", input_path.display()))?;
    info!("Generated file: {} ({rows} rows)", output_path.display());

    Ok(())
}
