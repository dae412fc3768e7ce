use super::*;
use crate::loader::{Capabilities, InputEncoding, LoadError, LoadHints, LoadedTable};
use crate::schema::create_marker_schema_arc;
use arrow::array::{ArrayRef, StringArray, UInt32Array};
use arrow::record_batch::RecordBatch;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

/// In-memory strategy with a fixed table and configurable behavior
struct MockStrategy {
    name: &'static str,
    capabilities: Capabilities,
    rows: usize,
    fail: bool,
    delay: Duration,
}

impl MockStrategy {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            capabilities: Capabilities::default().compressed(),
            rows: 4,
            fail: false,
            delay: Duration::ZERO,
        }
    }

    fn plain_only(mut self) -> Self {
        self.capabilities = Capabilities::default();
        self
    }

    fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl LoaderStrategy for MockStrategy {
    fn name(&self) -> &str {
        self.name
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn load(
        &self,
        _path: &Path,
        _encoding: InputEncoding,
        _hints: &LoadHints,
    ) -> Result<LoadedTable, LoadError> {
        std::thread::sleep(self.delay);
        if self.fail {
            return Err(LoadError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "corrupt stream",
            )));
        }

        let schema = create_marker_schema_arc(1);
        let text = |prefix: &str| -> ArrayRef {
            Arc::new(StringArray::from_iter_values(
                (0..self.rows).map(|i| format!("{}{}", prefix, i)),
            ))
        };
        let columns = vec![
            text("id_"),
            text("chr"),
            Arc::new(UInt32Array::from_iter_values(0..self.rows as u32)) as ArrayRef,
            text("N"),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
        Ok(LoadedTable::new(schema, vec![batch]))
    }
}

fn boxed(strategies: Vec<MockStrategy>) -> Vec<Box<dyn LoaderStrategy>> {
    strategies
        .into_iter()
        .map(|s| Box::new(s) as Box<dyn LoaderStrategy>)
        .collect()
}

fn hints() -> LoadHints {
    LoadHints::for_table(1, Some(4))
}

fn result(strategy: &str, input: InputEncoding, millis: u64) -> BenchmarkResult {
    BenchmarkResult {
        strategy_name: strategy.to_string(),
        input,
        replicate_index: 0,
        elapsed: Duration::from_millis(millis),
        rows: 1,
        columns: 1,
    }
}

#[test]
fn test_unsupported_compressed_input_is_recorded() {
    let strategies = boxed(vec![
        MockStrategy::new("a"),
        MockStrategy::new("b"),
        MockStrategy::new("c").plain_only(),
    ]);
    let inputs = vec![BenchmarkInput::new("markers.txt.gz", InputEncoding::Gzip)];

    let run = run_benchmark(&strategies, &inputs, &hints(), &HarnessConfig::with_replicates(3));

    assert_eq!(run.results.len(), 6);
    assert_eq!(run.results_for("a", InputEncoding::Gzip).count(), 3);
    assert_eq!(run.results_for("b", InputEncoding::Gzip).count(), 3);
    assert_eq!(run.results_for("c", InputEncoding::Gzip).count(), 0);

    assert_eq!(run.issues.len(), 1);
    let issue = run.issue_for("c", InputEncoding::Gzip).unwrap();
    assert!(issue.is_unsupported());
    assert!(!run.is_incomplete());
}

#[test]
fn test_matrix_is_complete() {
    let strategies = boxed(vec![MockStrategy::new("a"), MockStrategy::new("b").plain_only()]);
    let inputs = vec![
        BenchmarkInput::new("markers.txt", InputEncoding::Plain),
        BenchmarkInput::new("markers.txt.gz", InputEncoding::Gzip),
    ];

    let run = run_benchmark(&strategies, &inputs, &hints(), &HarnessConfig::with_replicates(2));

    // Every cell is either timed or reported
    for name in ["a", "b"] {
        for input in [InputEncoding::Plain, InputEncoding::Gzip] {
            let timed = run.results_for(name, input).count();
            let reported = run.issue_for(name, input).is_some();
            assert!(timed == 2 || reported, "{}/{} missing", name, input);
        }
    }
    assert_eq!(run.results.len(), 6);
}

#[test]
fn test_failing_loader_does_not_abort_run() {
    let strategies = boxed(vec![
        MockStrategy::new("broken").failing(),
        MockStrategy::new("ok"),
    ]);
    let inputs = vec![BenchmarkInput::new("markers.txt", InputEncoding::Plain)];

    let run = run_benchmark(&strategies, &inputs, &hints(), &HarnessConfig::with_replicates(4));

    assert_eq!(run.results_for("ok", InputEncoding::Plain).count(), 4);
    let issue = run.issue_for("broken", InputEncoding::Plain).unwrap();
    match &issue.error {
        HarnessError::StrategyUnsupported { reason } => assert!(reason.contains("corrupt stream")),
        other => panic!("unexpected issue {:?}", other),
    }
}

#[test]
fn test_failing_warmup_is_recorded() {
    let strategies = boxed(vec![MockStrategy::new("broken").failing()]);
    let inputs = vec![BenchmarkInput::new("markers.txt", InputEncoding::Plain)];
    let config = HarnessConfig {
        warmup: 1,
        ..HarnessConfig::with_replicates(2)
    };

    let run = run_benchmark(&strategies, &inputs, &hints(), &config);
    assert!(run.results.is_empty());
    assert_eq!(run.issues.len(), 1);
    assert!(run.issues[0].is_unsupported());
}

#[test]
fn test_shape_mismatch_is_recorded() {
    let strategies = boxed(vec![MockStrategy::new("short").rows(3), MockStrategy::new("ok")]);
    let inputs = vec![BenchmarkInput::new("markers.txt", InputEncoding::Plain)];
    let config = HarnessConfig {
        expected_shape: Some(ExpectedShape {
            rows: 4,
            genotype_columns: 1,
        }),
        ..HarnessConfig::with_replicates(2)
    };

    let run = run_benchmark(&strategies, &inputs, &hints(), &config);

    assert_eq!(run.results_for("ok", InputEncoding::Plain).count(), 2);
    let issue = run.issue_for("short", InputEncoding::Plain).unwrap();
    assert_eq!(
        issue.error,
        HarnessError::StrategyUnsupported {
            reason: "loaded 3 rows, expected 4".to_string()
        }
    );
}

#[test]
fn test_zero_time_limit_marks_everything_incomplete() {
    let strategies = boxed(vec![MockStrategy::new("a"), MockStrategy::new("b")]);
    let inputs = vec![BenchmarkInput::new("markers.txt", InputEncoding::Plain)];
    let config = HarnessConfig {
        time_limit: Some(Duration::ZERO),
        ..HarnessConfig::with_replicates(3)
    };

    let run = run_benchmark(&strategies, &inputs, &hints(), &config);

    assert!(run.results.is_empty());
    assert_eq!(run.issues.len(), 2);
    assert!(run.issues.iter().all(CellIssue::is_incomplete));
    assert_eq!(
        run.issues[0].error,
        HarnessError::Incomplete {
            completed: 0,
            requested: 3
        }
    );
}

#[test]
fn test_time_limit_keeps_completed_results() {
    let strategies = boxed(vec![
        MockStrategy::new("slow").delay(Duration::from_millis(40)),
        MockStrategy::new("never"),
    ]);
    let inputs = vec![BenchmarkInput::new("markers.txt", InputEncoding::Plain)];
    let config = HarnessConfig {
        time_limit: Some(Duration::from_millis(60)),
        ..HarnessConfig::with_replicates(10)
    };

    let run = run_benchmark(&strategies, &inputs, &hints(), &config);

    let completed = run.results_for("slow", InputEncoding::Plain).count();
    assert!(completed >= 1 && completed < 10);
    match &run.issue_for("slow", InputEncoding::Plain).unwrap().error {
        HarnessError::Incomplete {
            completed: reported,
            requested,
        } => {
            assert_eq!(*reported, completed);
            assert_eq!(*requested, 10);
        }
        other => panic!("unexpected issue {:?}", other),
    }
    assert!(run.issue_for("never", InputEncoding::Plain).unwrap().is_incomplete());
    assert!(run.is_incomplete());
}

#[test]
fn test_rerun_has_same_cardinality() {
    let strategies = boxed(vec![MockStrategy::new("a"), MockStrategy::new("b").plain_only()]);
    let inputs = vec![
        BenchmarkInput::new("markers.txt", InputEncoding::Plain),
        BenchmarkInput::new("markers.txt.gz", InputEncoding::Gzip),
    ];
    let config = HarnessConfig::with_replicates(2);

    let first = run_benchmark(&strategies, &inputs, &hints(), &config);
    let second = run_benchmark(&strategies, &inputs, &hints(), &config);

    assert_eq!(first.strategy_names(), second.strategy_names());
    assert_eq!(first.results.len(), second.results.len());
    assert_eq!(first.issues, second.issues);
}

#[test]
fn test_replicate_indices() {
    let strategies = boxed(vec![MockStrategy::new("a")]);
    let inputs = vec![BenchmarkInput::new("markers.txt", InputEncoding::Plain)];

    let run = run_benchmark(&strategies, &inputs, &hints(), &HarnessConfig::with_replicates(3));

    let indices: Vec<usize> = run.results.iter().map(|r| r.replicate_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert!(run.results.iter().all(|r| r.rows == 4 && r.columns == 4));
}

#[test]
fn test_quantile() {
    let values = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(quantile(&values, 0.0), 1.0);
    assert_eq!(quantile(&values, 1.0), 4.0);
    assert!((quantile(&values, 0.5) - 2.5).abs() < 1e-12);
    assert!((quantile(&values, 0.25) - 1.75).abs() < 1e-12);
    assert_eq!(quantile(&[7.0], 0.75), 7.0);
}

#[test]
fn test_summarize_groups_in_first_seen_order() {
    let results = vec![
        result("typed", InputEncoding::Plain, 30),
        result("inferred", InputEncoding::Plain, 50),
        result("typed", InputEncoding::Plain, 10),
        result("typed", InputEncoding::Gzip, 40),
        result("typed", InputEncoding::Plain, 20),
    ];

    let summary = summarize(&results);
    let labels: Vec<String> = summary.iter().map(SummaryRow::label).collect();
    assert_eq!(labels, vec!["typed/plain", "inferred/plain", "typed/gzip"]);

    let typed = &summary[0];
    assert_eq!(typed.count, 3);
    assert!((typed.min - 0.010).abs() < 1e-9);
    assert!((typed.median - 0.020).abs() < 1e-9);
    assert!((typed.mean - 0.020).abs() < 1e-9);
    assert!((typed.max - 0.030).abs() < 1e-9);
    assert!(typed.min <= typed.q1 && typed.q1 <= typed.median);
    assert!(typed.median <= typed.q3 && typed.q3 <= typed.max);
}

#[test]
fn test_summarize_empty() {
    assert!(summarize(&[]).is_empty());
    assert_eq!(render_box_plot(&[], 40), "");
}

#[test]
fn test_box_plot_rendering() {
    let results = vec![
        result("fast", InputEncoding::Plain, 10),
        result("fast", InputEncoding::Plain, 12),
        result("fast", InputEncoding::Plain, 14),
        result("slow", InputEncoding::Gzip, 80),
        result("slow", InputEncoding::Gzip, 100),
    ];
    let summary = summarize(&results);
    let plot = render_box_plot(&summary, 40);
    let lines: Vec<&str> = plot.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("fast/plain "));
    assert!(lines[1].starts_with("slow/gzip  "));
    assert!(lines[0].contains('#') && lines[1].contains('#'));
    // The slowest maximum sits at the right edge of the plot area
    assert!(lines[1].ends_with('|'));
    assert!(lines[2].contains("10.000ms") && lines[2].contains("100.000ms"));
}

#[test]
fn test_box_plot_degenerate_span() {
    let summary = summarize(&[result("a", InputEncoding::Plain, 5)]);
    let plot = render_box_plot(&summary, 20);
    assert!(plot.starts_with("a/plain #"));
}

#[test]
fn test_summary_table() {
    let summary = summarize(&[
        result("typed_sized", InputEncoding::Plain, 12),
        result("typed_sized", InputEncoding::Plain, 14),
    ]);
    let table = render_summary_table(&summary);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("strategy"));
    assert!(lines[1].starts_with("---"));
    assert!(lines[2].starts_with("typed_sized  plain"));
    assert!(lines[2].contains("13.000ms"));
}

#[test]
fn test_report_display() {
    let strategies = boxed(vec![MockStrategy::new("a"), MockStrategy::new("b").plain_only()]);
    let inputs = vec![BenchmarkInput::new("markers.txt.gz", InputEncoding::Gzip)];
    let run = run_benchmark(&strategies, &inputs, &hints(), &HarnessConfig::with_replicates(2));

    let report = BenchmarkReport::new(&run);
    assert_eq!(report.unsupported_count(), 1);
    assert_eq!(report.incomplete_count(), 0);

    let text = report.to_string();
    assert!(text.contains("Load Benchmark Report"));
    assert!(text.contains("[UNSUPPORTED] b/gzip"));
    assert!(text.contains("Summary: 2 invocations, 1 unsupported, 0 incomplete"));
}

#[test]
fn test_export_results() {
    let dir = tempdir().unwrap();
    let results = vec![
        result("typed", InputEncoding::Plain, 10),
        result("typed", InputEncoding::Gzip, 20),
    ];

    let csv_path = dir.path().join("results.csv");
    write_results_csv(&csv_path, &results).unwrap();
    let csv_text = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv_text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "strategy_name,input,replicate_index,elapsed_seconds,rows,columns"
    );
    assert!(lines.next().unwrap().starts_with("typed,plain,0,0.01"));

    let json_path = dir.path().join("summary.json");
    write_summary_json(&json_path, &summarize(&results)).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[1]["input"], "gzip");
    assert_eq!(json[0]["count"], 1);
}
