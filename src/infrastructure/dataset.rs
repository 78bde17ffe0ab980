//! Reads the delimited order-fulfillment export into the raw table.
//!
//! Parsing only; every cleaning decision lives in the pipeline.

use crate::config::DatasetConfig;
use crate::domain::table::Table;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;
use tracing::info;

pub struct DatasetLoader {
    delimiter: u8,
}

impl DatasetLoader {
    pub fn new(config: &DatasetConfig) -> Self {
        Self {
            delimiter: config.delimiter,
        }
    }

    /// Loads the file at `path`. Empty fields become missing cells; rows
    /// shorter than the header are padded with missing cells.
    pub fn load(&self, path: &Path) -> Result<Table> {
        let started = Instant::now();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open dataset at {}", path.display()))?;

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read header row of {}", path.display()))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result
                .with_context(|| format!("Failed to parse row {} of {}", index + 2, path.display()))?;
            rows.push(
                record
                    .iter()
                    .map(|field| {
                        let field = field.trim();
                        if field.is_empty() {
                            None
                        } else {
                            Some(field.to_string())
                        }
                    })
                    .collect(),
            );
        }

        let table = Table::from_rows(headers, rows);
        info!(
            rows = table.row_count(),
            columns = table.column_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dataset loaded"
        );
        Ok(table)
    }
}
