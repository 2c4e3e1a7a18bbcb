use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;

use crate::error::PipelineError;
use crate::recipe_parser::{RawRecord, SourceRow};

/// Reads every row of a recipe CSV. Fields missing from the header are
/// treated as empty; a structurally broken file fails the whole load.
pub fn read_raw_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, csv::Error> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut records = Vec::new();
    for result in rdr.deserialize::<SourceRow>() {
        records.push(RawRecord::from_row(result?));
    }
    Ok(records)
}

pub async fn load_raw_records(csv_path: &Path) -> Result<Vec<RawRecord>> {
    if !csv_path.exists() {
        return Err(PipelineError::SourceUnreadable {
            path: csv_path.to_path_buf(),
            reason: "file not found".to_string(),
        }
        .into());
    }

    let content = tokio::fs::read(csv_path)
        .await
        .map_err(|e| PipelineError::SourceUnreadable {
            path: csv_path.to_path_buf(),
            reason: e.to_string(),
        })
        .with_context(|| format!("Failed to read recipe source at {:?}", csv_path))?;

    let records = read_raw_records(content.as_slice())
        .map_err(|e| PipelineError::SourceUnreadable {
            path: csv_path.to_path_buf(),
            reason: e.to_string(),
        })?;

    tracing::info!(count = records.len(), path = ?csv_path, "Loaded raw recipe records");
    Ok(records)
}
