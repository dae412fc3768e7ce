use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Serialize, Serializer};

use super::summary::{summarize, SummaryRow};
use super::HarnessError;
use crate::loader::InputEncoding;

/// A fixture handed to every strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkInput {
    /// Fixture path
    pub path: PathBuf,
    /// Byte encoding of the fixture
    pub encoding: InputEncoding,
}

impl BenchmarkInput {
    /// Input at `path` with an explicit encoding
    pub fn new(path: impl AsRef<Path>, encoding: InputEncoding) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            encoding,
        }
    }

    /// Input whose encoding is taken from the file extension
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let encoding = InputEncoding::from_path(path.as_ref());
        Self::new(path, encoding)
    }
}

fn as_seconds<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// One timed invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    /// Strategy that was invoked
    pub strategy_name: String,
    /// Encoding of the fixture that was read
    pub input: InputEncoding,
    /// Which of the replicates this is (0-based)
    pub replicate_index: usize,
    /// Wall-clock duration of the load
    #[serde(rename = "elapsed_seconds", serialize_with = "as_seconds")]
    pub elapsed: Duration,
    /// Rows in the loaded table
    pub rows: usize,
    /// Columns in the loaded table
    pub columns: usize,
}

impl BenchmarkResult {
    /// Grouping label used by summaries and plots: `strategy/input`
    pub fn label(&self) -> String {
        format!("{}/{}", self.strategy_name, self.input)
    }
}

/// A (strategy, input) cell that is missing timings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellIssue {
    /// Strategy of the cell
    pub strategy_name: String,
    /// Input encoding of the cell
    pub input: InputEncoding,
    /// What went wrong
    pub error: HarnessError,
}

impl CellIssue {
    /// Whether this cell was skipped or failed for lack of support
    pub fn is_unsupported(&self) -> bool {
        matches!(self.error, HarnessError::StrategyUnsupported { .. })
    }

    /// Whether this cell was cut short by the time limit
    pub fn is_incomplete(&self) -> bool {
        matches!(self.error, HarnessError::Incomplete { .. })
    }
}

impl fmt::Display for CellIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}: {}", self.strategy_name, self.input, self.error)
    }
}

/// Everything a benchmark run produced
#[derive(Debug, Clone, Default)]
pub struct BenchmarkRun {
    /// Timed invocations in execution order
    pub results: Vec<BenchmarkResult>,
    /// Cells that are missing timings
    pub issues: Vec<CellIssue>,
    /// Wall-clock time of the whole run
    pub wall_clock: Duration,
}

impl BenchmarkRun {
    /// Names of every strategy that appears in results or issues
    pub fn strategy_names(&self) -> BTreeSet<&str> {
        self.results
            .iter()
            .map(|r| r.strategy_name.as_str())
            .chain(self.issues.iter().map(|i| i.strategy_name.as_str()))
            .collect()
    }

    /// Timings of one cell
    pub fn results_for<'a>(
        &'a self,
        strategy_name: &'a str,
        input: InputEncoding,
    ) -> impl Iterator<Item = &'a BenchmarkResult> + 'a {
        self.results
            .iter()
            .filter(move |r| r.strategy_name == strategy_name && r.input == input)
    }

    /// Issue recorded for one cell, if any
    pub fn issue_for(&self, strategy_name: &str, input: InputEncoding) -> Option<&CellIssue> {
        self.issues
            .iter()
            .find(|i| i.strategy_name == strategy_name && i.input == input)
    }

    /// Whether the time limit cut the run short
    pub fn is_incomplete(&self) -> bool {
        self.issues.iter().any(CellIssue::is_incomplete)
    }

    /// Per-cell summary statistics
    pub fn summary(&self) -> Vec<SummaryRow> {
        summarize(&self.results)
    }
}
