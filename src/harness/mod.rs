//! # Benchmark Harness
//!
//! Times every loader strategy against every fixture input.
//!
//! ## Measurement contract
//!
//! - The matrix is complete: each (strategy, input) pairing is a *cell*, and
//!   every cell either yields `replicates` timings or is listed in
//!   [`BenchmarkRun::issues`].
//! - Each invocation opens the fixture afresh and the loaded table is dropped
//!   before the next one starts. Nothing is cached across invocations.
//! - A strategy that cannot read an input (by capability or by failing) is
//!   recorded as [`HarnessError::StrategyUnsupported`] for that cell only.
//! - With a time limit, the limit is checked before each invocation. Cells
//!   that did not finish are recorded as [`HarnessError::Incomplete`] and the
//!   timings gathered so far are kept.
//!
//! Summaries and plots consume [`BenchmarkResult`] values only, so they are
//! independent of how the timings were taken.

mod error;
mod report;
mod result;
mod summary;

#[cfg(test)]
mod tests;

pub use error::{HarnessError, ReportError};
pub use report::{
    render_box_plot, render_summary_table, write_results_csv, write_summary_json,
    BenchmarkReport, DEFAULT_PLOT_WIDTH,
};
pub use result::{BenchmarkInput, BenchmarkResult, BenchmarkRun, CellIssue};
pub use summary::{quantile, summarize, SummaryRow};

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::loader::{LoadHints, LoadedTable, LoaderStrategy};
use crate::schema::validate_marker_schema;

/// Shape every loaded table must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedShape {
    /// Data rows
    pub rows: usize,
    /// Genotype columns
    pub genotype_columns: usize,
}

impl ExpectedShape {
    fn check(&self, table: &LoadedTable) -> Result<(), String> {
        if table.num_rows() != self.rows {
            return Err(format!(
                "loaded {} rows, expected {}",
                table.num_rows(),
                self.rows
            ));
        }
        validate_marker_schema(table.schema(), self.genotype_columns).map_err(|e| e.to_string())
    }
}

/// Configuration for a benchmark run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Timed invocations per cell
    pub replicates: usize,

    /// Untimed invocations per cell before the replicates
    pub warmup: usize,

    /// Wall-clock ceiling of the run (None = unbounded)
    pub time_limit: Option<Duration>,

    /// Verify the shape of every loaded table
    pub expected_shape: Option<ExpectedShape>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            replicates: 5,
            warmup: 0,
            time_limit: None,
            expected_shape: None,
        }
    }
}

impl HarnessConfig {
    /// Config with `replicates` timed invocations per cell
    pub fn with_replicates(replicates: usize) -> Self {
        Self {
            replicates,
            ..Default::default()
        }
    }
}

struct Clock {
    started: Instant,
    limit: Option<Duration>,
}

impl Clock {
    fn expired(&self) -> bool {
        self.limit
            .map(|limit| self.started.elapsed() >= limit)
            .unwrap_or(false)
    }
}

/// Run every strategy against every input.
///
/// Never fails as a whole: per-cell problems are collected in
/// [`BenchmarkRun::issues`].
pub fn run_benchmark(
    strategies: &[Box<dyn LoaderStrategy>],
    inputs: &[BenchmarkInput],
    hints: &LoadHints,
    config: &HarnessConfig,
) -> BenchmarkRun {
    let clock = Clock {
        started: Instant::now(),
        limit: config.time_limit,
    };

    info!(
        "Benchmarking {} strategies x {} inputs, {} replicates each",
        strategies.len(),
        inputs.len(),
        config.replicates
    );

    let mut run = BenchmarkRun::default();
    for strategy in strategies {
        for input in inputs {
            run_cell(strategy.as_ref(), input, hints, config, &clock, &mut run);
        }
    }

    run.wall_clock = clock.started.elapsed();
    info!(
        "Benchmark finished: {} invocations, {} issues in {:.2?}",
        run.results.len(),
        run.issues.len(),
        run.wall_clock
    );
    run
}

fn run_cell(
    strategy: &dyn LoaderStrategy,
    input: &BenchmarkInput,
    hints: &LoadHints,
    config: &HarnessConfig,
    clock: &Clock,
    run: &mut BenchmarkRun,
) {
    let mut record_issue = |error: HarnessError| {
        warn!("{}/{}: {}", strategy.name(), input.encoding, error);
        run.issues.push(CellIssue {
            strategy_name: strategy.name().to_string(),
            input: input.encoding,
            error,
        });
    };

    if !strategy.capabilities().accepts(input.encoding) {
        record_issue(HarnessError::StrategyUnsupported {
            reason: format!("no {} input support", input.encoding),
        });
        return;
    }

    for _ in 0..config.warmup {
        if clock.expired() {
            record_issue(HarnessError::Incomplete {
                completed: 0,
                requested: config.replicates,
            });
            return;
        }
        if let Err(e) = strategy.load(&input.path, input.encoding, hints) {
            record_issue(HarnessError::StrategyUnsupported {
                reason: e.to_string(),
            });
            return;
        }
    }

    let mut timings = Vec::with_capacity(config.replicates);
    let mut failure = None;

    for replicate_index in 0..config.replicates {
        if clock.expired() {
            failure = Some(HarnessError::Incomplete {
                completed: replicate_index,
                requested: config.replicates,
            });
            break;
        }

        let start = Instant::now();
        let outcome = strategy.load(&input.path, input.encoding, hints);
        let elapsed = start.elapsed();

        let table = match outcome {
            Ok(table) => table,
            Err(e) => {
                failure = Some(HarnessError::StrategyUnsupported {
                    reason: e.to_string(),
                });
                break;
            }
        };

        if let Some(Err(reason)) = config.expected_shape.map(|shape| shape.check(&table)) {
            failure = Some(HarnessError::StrategyUnsupported { reason });
            break;
        }

        let (rows, columns) = (table.num_rows(), table.num_columns());
        drop(table);

        debug!(
            "{}/{} #{}: {:.3?}",
            strategy.name(),
            input.encoding,
            replicate_index,
            elapsed
        );
        timings.push(BenchmarkResult {
            strategy_name: strategy.name().to_string(),
            input: input.encoding,
            replicate_index,
            elapsed,
            rows,
            columns,
        });
    }

    if let Some(error) = failure {
        record_issue(error);
    }
    run.results.extend(timings);
}
