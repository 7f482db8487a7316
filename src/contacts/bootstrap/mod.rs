mod parser;

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use super::repository::{ContactRepository, RepositoryError};

/// Failure that aborts a bootstrap run. Row-level validation problems are not
/// represented here; those rows are skipped and the run continues.
#[derive(Debug)]
pub enum BootstrapError {
    Io(std::io::Error),
    Csv(csv::Error),
    Repository(RepositoryError),
}

impl std::fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BootstrapError::Io(err) => write!(f, "failed to read contact export: {}", err),
            BootstrapError::Csv(err) => write!(f, "invalid contact export data: {}", err),
            BootstrapError::Repository(err) => write!(f, "could not persist contact: {}", err),
        }
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BootstrapError::Io(err) => Some(err),
            BootstrapError::Csv(err) => Some(err),
            BootstrapError::Repository(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BootstrapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BootstrapError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<RepositoryError> for BootstrapError {
    fn from(err: RepositoryError) -> Self {
        Self::Repository(err)
    }
}

/// One-shot loader seeding the contact store from a CSV export.
///
/// Rows are processed strictly in file order. A row failing validation is
/// skipped for the whole run; a file that cannot be opened or read aborts the
/// run. Repeated calls re-append valid rows, there is no deduplication.
pub struct CsvBootstrap<R> {
    source: PathBuf,
    repository: Arc<R>,
}

impl<R: ContactRepository> CsvBootstrap<R> {
    pub fn new(source: impl Into<PathBuf>, repository: Arc<R>) -> Self {
        Self {
            source: source.into(),
            repository,
        }
    }

    /// Load the configured file into the repository. Completing with zero
    /// persisted contacts is success, not an error.
    pub fn boot(&self) -> Result<(), BootstrapError> {
        let file = File::open(&self.source)?;
        info!(source = %self.source.display(), "booting address book from contact export");
        Self::load(file, self.repository.as_ref())
    }

    /// Run the same pipeline over any reader. The HTTP bootstrap trigger
    /// feeds inline request bodies through here.
    pub fn load<T: Read>(reader: T, repository: &R) -> Result<(), BootstrapError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut loaded = 0usize;
        let mut skipped = 0usize;

        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            match parser::contact_from_record(&record) {
                Ok(contact) => {
                    repository.save(contact)?;
                    loaded += 1;
                }
                Err(reason) => {
                    debug!(line = line + 1, %reason, "skipping malformed contact row");
                    skipped += 1;
                }
            }
        }

        info!(loaded, skipped, "address book bootstrap complete");
        Ok(())
    }
}
