//! Delimited-text ingestion: header-based field naming with dynamic typing.
//!
//! Cells that parse as numbers become [`Value::Number`], empty cells become
//! [`Value::Null`], everything else stays text. Rows may be ragged; missing
//! trailing cells simply read as absent fields.

use std::fs::File;
use std::io::{BufReader, Read};

use csv::ReaderBuilder;
use log::info;

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::models::{Dataset, Record, Value};

/// Load both source datasets named by the config.
pub fn load_inputs(cfg: &IngestConfig) -> Result<(Dataset, Dataset), IngestError> {
    let label_a = cfg.label_a.as_deref().unwrap_or("A");
    let label_b = cfg.label_b.as_deref().unwrap_or("B");
    let a = load_dataset(&cfg.file_a, label_a)?;
    let b = load_dataset(&cfg.file_b, label_b)?;
    info!(
        "loaded {} records from {} ({}) and {} records from {} ({})",
        a.len(),
        cfg.file_a,
        a.label,
        b.len(),
        cfg.file_b,
        b.label
    );
    Ok((a, b))
}

pub fn load_dataset(path: &str, label: &str) -> Result<Dataset, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_string(),
        source,
    })?;
    read_dataset(BufReader::new(file), label, path)
}

/// Decode a dataset from any reader. `origin` names the source in errors.
pub fn read_dataset<R: Read>(
    reader: R,
    label: &str,
    origin: &str,
) -> Result<Dataset, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|source| IngestError::Csv {
            path: origin.to_string(),
            source,
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(IngestError::MissingHeader {
            path: origin.to_string(),
        });
    }

    let mut dataset = Dataset::new(label, headers);
    for row in rdr.records() {
        let row = row.map_err(|source| IngestError::Csv {
            path: origin.to_string(),
            source,
        })?;
        let mut record = Record::new();
        for (name, cell) in dataset.headers.iter().zip(row.iter()) {
            record.set(name.clone(), infer_value(cell));
        }
        dataset.records.push(record);
    }
    Ok(dataset)
}

/// Dynamic typing for one cell.
fn infer_value(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Number(n),
        _ => Value::Text(cell.to_string()),
    }
}
