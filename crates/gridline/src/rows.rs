//! Loading row data from JSON, YAML and CSV.
//!
//! JSON and YAML inputs must be a sequence of objects. CSV rows are keyed by
//! the header line; cell text is typed on the way in so that numbers sort as
//! numbers and booleans export as `Yes`/`No`.

use std::io::Read;

use serde_json::{Number, Value};

use crate::error::{GridError, Result};
use crate::Row;

/// Parse a JSON array of objects.
pub fn rows_from_json(input: &str) -> Result<Vec<Row>> {
    let value: Value = serde_json::from_str(input)?;
    into_rows(value)
}

/// Parse a YAML sequence of mappings.
pub fn rows_from_yaml(input: &str) -> Result<Vec<Row>> {
    let value: Value = serde_yaml::from_str(input)?;
    into_rows(value)
}

/// Parse CSV with a header line.
pub fn rows_from_csv(reader: impl Read) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(key, cell)| (key.to_string(), typed_cell(cell)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn into_rows(value: Value) -> Result<Vec<Row>> {
    let Value::Array(items) = value else {
        return Err(GridError::Serialization(
            "expected a list of row objects".to_string(),
        ));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(row) => Ok(row),
            other => Err(GridError::Serialization(format!(
                "row {} is not an object: {}",
                index, other
            ))),
        })
        .collect()
}

/// Empty → null, then integer, float and boolean, else the text itself.
fn typed_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = cell.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Some(n) = cell.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    match cell {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(cell.to_string()),
    }
}
