use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a counting run before or while reading the header.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("invalid file path: {path:?}, expecting a '.csv' file")]
    InvalidExtension { path: PathBuf },

    #[error("the file does not exist at the specified path: {path:?}")]
    FileNotFound { path: PathBuf },

    #[error("the email field name is empty")]
    EmptyFieldName,

    #[error("failed to open the file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read the header row from {path:?}: {source}")]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("the file {path:?} has no header row")]
    MissingHeader { path: PathBuf },

    #[error("failed to find the field '{field}' in the headers of {path:?}")]
    FieldNotFound { field: String, path: PathBuf },

    #[error("I/O error while reading rows from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, ImportError>;

/// Per-row problems. These are logged and counted, never returned from a run.
#[derive(Error, Debug)]
pub enum RowError {
    #[error("malformed row at line {line}: {source}")]
    Malformed {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("row at line {line} has no column {index}")]
    MissingField { line: u64, index: usize },

    #[error("invalid email address '{value}' at line {line}")]
    InvalidEmail { line: u64, value: String },

    #[error("unable to extract domain from email: {value}")]
    DomainExtraction { value: String },
}

impl RowError {
    /// Short label used in structured log events.
    pub fn kind(&self) -> &'static str {
        match self {
            RowError::Malformed { .. } => "malformed",
            RowError::MissingField { .. } => "missing_field",
            RowError::InvalidEmail { .. } => "invalid_email",
            RowError::DomainExtraction { .. } => "domain_extraction",
        }
    }
}
