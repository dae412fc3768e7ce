use super::InputEncoding;

/// Errors that can occur while loading a fixture
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The strategy cannot read this input encoding
    #[error("Strategy '{strategy}' cannot read {encoding} input")]
    UnsupportedInput {
        /// Name of the strategy
        strategy: String,
        /// Encoding it was handed
        encoding: InputEncoding,
    },

    /// No strategy with this name is registered
    #[error("Unknown loader strategy '{0}'")]
    UnknownStrategy(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// CSV error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
