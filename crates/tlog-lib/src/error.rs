use std::path::PathBuf;
use thiserror::Error;

/// Failure of one pipeline stage. Every variant aborts the run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("reading header {}: {source}", path.display())]
    ReadHeader {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing timestamps {} for relations: {source}", path.display())]
    ReadTimestamps {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("parsing data file {}: {source}", path.display())]
    ReadData {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("parsing data file {}: missing column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("writing output {}: {source}", path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no {name} path given")]
    MissingPath { name: &'static str },

    #[error("loading job file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;
