//! CSV and record-oriented JSON for the ad table.
//!
//! Reading sniffs cell types from the text: empty cells become nulls,
//! numeric-looking cells become numbers, everything else stays text.
//! Columns the pipeline never touches ride along untouched.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use property_map_table::{Table, Value};

use crate::IngestError;

/// Converts one raw CSV cell into a table value.
///
/// Cells that parse to a non-finite number ("NaN", "inf") become
/// nulls: they mark missing data in the raw files, and carrying them
/// as numbers would corrupt every statistic computed downstream.
fn sniff_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Number(n),
        Ok(_) => Value::Null,
        Err(_) => Value::text(raw),
    }
}

/// Formats one table value as a CSV field.
fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Number(n) => {
            #[allow(clippy::cast_possible_truncation)]
            if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Value::Text(s) => s.clone(),
    }
}

/// Parses a headered CSV stream into a table.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] on malformed CSV.
pub fn read_csv(reader: impl Read) -> Result<Table, IngestError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(ToOwned::to_owned)
        .collect();

    let mut table = Table::new(columns);
    for record in csv_reader.records() {
        let record = record?;
        let row = record.iter().map(sniff_cell).collect();
        table.push_row(row)?;
    }
    Ok(table)
}

/// Reads the raw ad dataset from a CSV file.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be opened or parsed.
pub fn read_csv_file(path: &Path) -> Result<Table, IngestError> {
    let table = read_csv(File::open(path)?)?;
    log::info!(
        "read {} rows x {} columns from {}",
        table.len(),
        table.columns().len(),
        path.display()
    );
    Ok(table)
}

/// Writes the table as headered CSV.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] if writing fails.
pub fn write_csv(table: &Table, writer: impl Write) -> Result<(), IngestError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.columns())?;
    for row in table.rows() {
        csv_writer.write_record(row.iter().map(format_cell))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes the cleaned table to a CSV file.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be created or written.
pub fn write_csv_file(table: &Table, path: &Path) -> Result<(), IngestError> {
    write_csv(table, File::create(path)?)?;
    log::info!("wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Converts the table into a JSON array with one object per row.
///
/// No row index is embedded; the object keys are the column names.
///
/// # Errors
///
/// Returns [`IngestError::Json`] if a value fails to serialize.
pub fn to_json_records(table: &Table) -> Result<serde_json::Value, IngestError> {
    let mut records = Vec::with_capacity(table.len());
    for row in table.rows() {
        let mut object = serde_json::Map::new();
        for (column, value) in table.columns().iter().zip(row) {
            object.insert(column.clone(), serde_json::to_value(value)?);
        }
        records.push(serde_json::Value::Object(object));
    }
    Ok(serde_json::Value::Array(records))
}

/// Writes the cleaned table as record-oriented JSON.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be created or written.
pub fn write_json_file(table: &Table, path: &Path) -> Result<(), IngestError> {
    let records = to_json_records(table)?;
    serde_json::to_writer(File::create(path)?, &records)?;
    log::info!("wrote {} records to {}", table.len(), path.display());
    Ok(())
}
