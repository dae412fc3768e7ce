/// Why a (strategy, input) cell produced fewer timings than requested.
///
/// These are recorded in [`BenchmarkRun::issues`](super::BenchmarkRun) and
/// never abort the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HarnessError {
    /// The strategy cannot process this input, or failed while loading it
    #[error("Strategy unsupported: {reason}")]
    StrategyUnsupported {
        /// Why the cell could not be timed
        reason: String,
    },

    /// The time limit was reached before every replicate ran
    #[error("Incomplete: {completed} of {requested} replicates ran before the time limit")]
    Incomplete {
        /// Replicates that finished
        completed: usize,
        /// Replicates that were requested
        requested: usize,
    },
}

/// Errors that can occur while exporting results
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
