pub mod args;
pub mod domain;
pub mod error;
pub mod importer;
pub mod report;
pub mod stats;
pub mod utils;

pub use args::Args;
pub use domain::DomainCase;
pub use error::{ImportError, RowError};
pub use importer::CustomerImporter;
pub use stats::{DomainCount, ImportReport, ImportSummary};
