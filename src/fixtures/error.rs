use std::fmt;

/// The on-disk artifacts a run depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureKind {
    /// Scratch directory holding the fixtures
    Directory,
    /// Tab-separated text table
    Delimited,
    /// Gzip copy of the text table
    Compressed,
    /// ZIP container holding the Parquet matrix
    Container,
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureKind::Directory => write!(f, "directory"),
            FixtureKind::Delimited => write!(f, "delimited text"),
            FixtureKind::Compressed => write!(f, "compressed text"),
            FixtureKind::Container => write!(f, "columnar container"),
        }
    }
}

/// Underlying library failure behind a fixture error
#[derive(Debug, thiserror::Error)]
pub enum FixtureCause {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the CSV writer
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from the Arrow library during array operations
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Error from the ZIP container library
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Error serializing/deserializing the container manifest
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors that can occur while persisting or inspecting fixtures
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// A fixture could not be written; the run cannot be timed
    #[error("Failed to write {fixture} fixture: {cause}")]
    FixtureWriteFailure {
        /// Which fixture failed
        fixture: FixtureKind,
        /// What failed underneath
        #[source]
        cause: FixtureCause,
    },

    /// A fixture was written but does not reproduce its source
    #[error("{fixture} fixture does not round-trip: {detail}")]
    RoundTripMismatch {
        /// Which fixture failed verification
        fixture: FixtureKind,
        /// Description of the mismatch
        detail: String,
    },

    /// A container could not be read back
    #[error("Failed to read container: {0}")]
    ContainerRead(#[source] FixtureCause),

    /// A container is readable but malformed
    #[error("Invalid container: {0}")]
    InvalidContainer(String),

    /// Fixtures were requested before they were written
    #[error("Fixtures have not been written yet")]
    NotWritten,
}

impl FixtureError {
    pub(crate) fn write_failure<E: Into<FixtureCause>>(fixture: FixtureKind) -> impl FnOnce(E) -> Self {
        move |e| Self::FixtureWriteFailure {
            fixture,
            cause: e.into(),
        }
    }

    pub(crate) fn read_failure<E: Into<FixtureCause>>(e: E) -> Self {
        Self::ContainerRead(e.into())
    }
}
