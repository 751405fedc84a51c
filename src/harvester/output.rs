use super::types::CatalogRecord;
use crate::Result;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Column set of a batch of records: every key, in first-seen order.
pub fn columns(records: &[CatalogRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.fields().keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Writes one row per record. Cells for keys a record lacks are left empty.
pub fn write_records<W: Write>(writer: W, records: &[CatalogRecord]) -> Result<()> {
    let columns = columns(records);
    let mut csv = csv::Writer::from_writer(writer);

    if !columns.is_empty() {
        csv.write_record(&columns)?;
    }
    for record in records {
        let row = columns
            .iter()
            .map(|column| record.get(column).map(cell).unwrap_or_default());
        csv.write_record(row)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn save_records(path: impl AsRef<Path>, records: &[CatalogRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_records(file, records)?;
    info!("Saved {} ({} rows)", path.display(), records.len());
    Ok(())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        nested => nested.to_string(),
    }
}
