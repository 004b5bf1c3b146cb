use csv::{ReaderBuilder, StringRecord};
use rayon::prelude::*;
use std::borrow::Cow;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{info, warn};

use crate::domain::{self, DomainCase};
use crate::error::{ImportError, Result, RowError};
use crate::stats::{DomainCount, DomainTally, ImportReport, ImportSummary};

const CSV_SUFFIX: &[u8] = b".csv";

/// Counts customer email domains in a CSV file.
///
/// Construction only validates its inputs; the file is opened and streamed
/// row by row each time a count is requested.
#[derive(Debug, Clone)]
pub struct CustomerImporter {
    path: PathBuf,
    field: String,
    domain_case: DomainCase,
    delimiter: u8,
}

impl CustomerImporter {
    pub fn new(path: impl Into<PathBuf>, field: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let field = field.into();

        if !path.as_os_str().as_encoded_bytes().ends_with(CSV_SUFFIX) {
            return Err(ImportError::InvalidExtension { path });
        }
        // Only a missing file is rejected here; anything else surfaces on open.
        if let Err(err) = fs::metadata(&path) {
            if err.kind() == io::ErrorKind::NotFound {
                return Err(ImportError::FileNotFound { path });
            }
        }
        if field.is_empty() {
            return Err(ImportError::EmptyFieldName);
        }

        Ok(Self {
            path,
            field,
            domain_case: DomainCase::default(),
            delimiter: b',',
        })
    }

    pub fn with_domain_case(mut self, domain_case: DomainCase) -> Self {
        self.domain_case = domain_case;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Domains ranked by how many rows reference them, highest first.
    pub fn domain_counts(&self) -> Result<Vec<DomainCount>> {
        Ok(self.analyze()?.domains)
    }

    /// Single-threaded streaming run.
    pub fn analyze(&self) -> Result<ImportReport> {
        let start_time = Instant::now();
        info!(action = "start", component = "domain_count", file_path = ?self.path, field = %self.field, "Counting email domains");

        let (mut reader, index) = self.open()?;

        let mut tally = DomainTally::default();
        let mut summary = ImportSummary::default();
        let mut record = StringRecord::new();

        loop {
            match reader.read_record(&mut record) {
                Ok(true) => self.count_row(Ok(&record), index, &mut tally, &mut summary),
                Ok(false) => break,
                Err(err) if err.is_io_error() => {
                    return Err(ImportError::Read {
                        path: self.path.clone(),
                        source: err,
                    })
                }
                Err(err) => self.count_row(Err(malformed(err)), index, &mut tally, &mut summary),
            }
        }

        Ok(self.finish(tally, summary, start_time))
    }

    /// Concurrent run over `workers` threads.
    ///
    /// Rows are still read in order by one reader; each worker folds into its
    /// own tally and the partial tallies are merged pairwise at the end.
    pub fn analyze_parallel(&self, workers: usize) -> Result<ImportReport> {
        let start_time = Instant::now();
        info!(action = "start", component = "domain_count", file_path = ?self.path, field = %self.field, worker_count = workers, "Counting email domains in parallel");

        let (reader, index) = self.open()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;

        let io_failure: Mutex<Option<csv::Error>> = Mutex::new(None);
        let records = reader.into_records().map_while(|result| match result {
            Err(err) if err.is_io_error() => {
                if let Ok(mut slot) = io_failure.lock() {
                    *slot = Some(err);
                }
                None
            }
            other => Some(other),
        });

        let (tally, summary) = pool.install(|| {
            records
                .par_bridge()
                .fold(
                    || (DomainTally::default(), ImportSummary::default()),
                    |(mut tally, mut summary), result| {
                        match result {
                            Ok(record) => self.count_row(Ok(&record), index, &mut tally, &mut summary),
                            Err(err) => self.count_row(Err(malformed(err)), index, &mut tally, &mut summary),
                        }
                        (tally, summary)
                    },
                )
                .reduce(
                    || (DomainTally::default(), ImportSummary::default()),
                    |(left_tally, left_summary), (right_tally, right_summary)| {
                        (left_tally.merge(right_tally), left_summary.merge(right_summary))
                    },
                )
        });

        let io_failure = io_failure
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(err) = io_failure {
            return Err(ImportError::Read {
                path: self.path.clone(),
                source: err,
            });
        }

        Ok(self.finish(tally, summary, start_time))
    }

    fn open(&self) -> Result<(csv::Reader<File>, usize)> {
        let file = File::open(&self.path).map_err(|source| ImportError::Open {
            path: self.path.clone(),
            source,
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(file);

        let headers = reader.headers().map_err(|source| ImportError::Header {
            path: self.path.clone(),
            source,
        })?;
        if headers.is_empty() {
            return Err(ImportError::MissingHeader {
                path: self.path.clone(),
            });
        }

        let index = headers
            .iter()
            .position(|name| name == self.field)
            .ok_or_else(|| ImportError::FieldNotFound {
                field: self.field.clone(),
                path: self.path.clone(),
            })?;

        info!(action = "resolve", component = "field_locator", field = %self.field, column = index, header_fields = headers.len(), "Located email column");
        Ok((reader, index))
    }

    fn count_row(
        &self,
        row: std::result::Result<&StringRecord, RowError>,
        index: usize,
        tally: &mut DomainTally,
        summary: &mut ImportSummary,
    ) {
        summary.rows_read += 1;

        match row.and_then(|record| self.row_domain(record, index)) {
            Ok(domain) => {
                tally.record(&domain);
                summary.rows_counted += 1;
            }
            Err(err) => {
                match err {
                    RowError::Malformed { .. } => summary.rows_skipped_malformed += 1,
                    _ => summary.rows_skipped_invalid += 1,
                }
                warn!(action = "skip", component = "row", reason = err.kind(), error = %err, "Skipping row");
            }
        }
    }

    fn row_domain<'r>(
        &self,
        record: &'r StringRecord,
        index: usize,
    ) -> std::result::Result<Cow<'r, str>, RowError> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let email = record
            .get(index)
            .ok_or(RowError::MissingField { line, index })?;

        if !domain::is_valid_email(email) {
            return Err(RowError::InvalidEmail {
                line,
                value: email.to_string(),
            });
        }

        let domain = domain::extract_domain(email)?;
        Ok(domain::normalize_domain(domain, self.domain_case))
    }

    fn finish(&self, tally: DomainTally, summary: ImportSummary, start_time: Instant) -> ImportReport {
        let domains = tally.into_ranked();
        let elapsed = start_time.elapsed();

        info!(
            action = "complete",
            component = "domain_count",
            unique_domains = domains.len(),
            rows_read = summary.rows_read,
            rows_counted = summary.rows_counted,
            rows_skipped = summary.rows_skipped(),
            duration_ms = elapsed.as_millis(),
            "Domain count completed"
        );

        ImportReport {
            domains,
            summary,
            elapsed,
        }
    }
}

fn malformed(source: csv::Error) -> RowError {
    RowError::Malformed {
        line: source.position().map(|p| p.line()).unwrap_or(0),
        source,
    }
}
