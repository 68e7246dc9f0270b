use crate::error::{ReportError, Result};
use crate::io::table::{tab_reader, ColumnIndex};
use crate::trial::{RelationMap, TrialRow};
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const BLOCK_COLUMN: &str = "Session.Block.UID";
pub const TRIAL_COLUMN: &str = "Session.Block.Trial.UID";
pub const TIPO_COLUMN: &str = "Session.Block.Trial.Name";
pub const RESULT_COLUMN: &str = "Result";

/// First cell of the non-data trailer rows in the data export.
pub const TRAILER_SENTINEL: &str = "Report.Timestamp";

/// Data file failure before it is tied to a path.
#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("missing column '{0}'")]
    MissingColumn(String),
}

impl DataError {
    fn at(self, path: PathBuf) -> ReportError {
        match self {
            DataError::Csv(source) => ReportError::ReadData { path, source },
            DataError::MissingColumn(column) => ReportError::MissingColumn { path, column },
        }
    }
}

/// Parse trial rows from a tab-delimited source, joining each with its relation.
pub fn parse_trial_rows<R: Read>(
    source: R,
    relations: &RelationMap,
) -> std::result::Result<Vec<TrialRow>, DataError> {
    let mut reader = tab_reader(source);
    let columns = ColumnIndex::from_headers(reader.headers()?);
    let [block_idx, trial_idx, tipo_idx, result_idx] = columns
        .require([BLOCK_COLUMN, TRIAL_COLUMN, TIPO_COLUMN, RESULT_COLUMN])
        .map_err(DataError::MissingColumn)?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let first = record.get(0).unwrap_or("");
        if record.is_empty() || (record.len() == 1 && first.is_empty()) {
            continue;
        }
        if first == TRAILER_SENTINEL {
            debug!("skipping trailer row {}", line + 2);
            continue;
        }
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
        let block = cell(block_idx);
        let trial = cell(trial_idx);
        let relation = relations.relation_for(&block, &trial);
        rows.push(TrialRow {
            tipo: cell(tipo_idx),
            resultado: cell(result_idx),
            block,
            trial,
            relation,
        });
    }
    Ok(rows)
}

/// Read the data export at `path` into trial rows in file order.
pub fn read_trial_rows(path: &Path, relations: &RelationMap) -> Result<Vec<TrialRow>> {
    let file = File::open(path).map_err(|e| DataError::Csv(e.into()).at(path.to_path_buf()))?;
    let rows = parse_trial_rows(file, relations).map_err(|e| e.at(path.to_path_buf()))?;
    info!("read {} trial row(s) from {}", rows.len(), path.display());
    Ok(rows)
}
