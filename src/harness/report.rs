use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "colorized_output")]
use console::style;

use super::{BenchmarkResult, BenchmarkRun, CellIssue, ReportError, SummaryRow};

/// Default width of the box plot area in characters
pub const DEFAULT_PLOT_WIDTH: usize = 60;

fn format_ms(seconds: f64) -> String {
    format!("{:.3}ms", seconds * 1_000.0)
}

/// Fixed-width text table of per-cell statistics (milliseconds).
pub fn render_summary_table(rows: &[SummaryRow]) -> String {
    let headers = ["strategy", "input", "n", "min", "q1", "median", "mean", "q3", "max"];

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.strategy_name.clone(),
                row.input.to_string(),
                row.count.to_string(),
                format_ms(row.min),
                format_ms(row.q1),
                format_ms(row.median),
                format_ms(row.mean),
                format_ms(row.q3),
                format_ms(row.max),
            ]
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| body.iter().map(|r| r[i].len()).fold(h.len(), usize::max))
        .collect();

    let render_line = |cells: &[String]| -> String {
        let line = cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                // Text columns left-aligned, numbers right-aligned
                if i < 2 {
                    format!("{:<w$}", cell, w = *w)
                } else {
                    format!("{:>w$}", cell, w = *w)
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", line.trim_end())
    };

    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = render_line(&header[..]);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&render_line(&rule[..]));
    for row in &body {
        out.push_str(&render_line(row.as_slice()));
    }
    out
}

/// Horizontal box plot, one line per cell on a shared time axis.
///
/// `|---[==#==]---|` marks min, q1, median, q3 and max.
pub fn render_box_plot(rows: &[SummaryRow], width: usize) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let width = width.max(10);
    let lo = rows.iter().map(|r| r.min).fold(f64::INFINITY, f64::min);
    let hi = rows.iter().map(|r| r.max).fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;

    let column = |value: f64| -> usize {
        if span <= 0.0 {
            return 0;
        }
        let scaled = ((value - lo) / span * (width - 1) as f64).round() as usize;
        scaled.min(width - 1)
    };

    let labels: Vec<String> = rows.iter().map(SummaryRow::label).collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    for (row, label) in rows.iter().zip(&labels) {
        let (min, q1, median, q3, max) = (
            column(row.min),
            column(row.q1),
            column(row.median),
            column(row.q3),
            column(row.max),
        );

        let mut line = vec![' '; width];
        line[min..=max].fill('-');
        line[q1..=q3].fill('=');
        line[min] = '|';
        line[max] = '|';
        line[q1] = '[';
        line[q3] = ']';
        line[median] = '#';

        let plot: String = line.into_iter().collect();
        out.push_str(&format!("{:<lw$} {}\n", label, plot.trim_end(), lw = label_width));
    }

    let left = format_ms(lo);
    let right = format_ms(hi);
    let gap = width.saturating_sub(left.len() + right.len()).max(1);
    out.push_str(&format!(
        "{:<lw$} {}{}{}\n",
        "",
        left,
        " ".repeat(gap),
        right,
        lw = label_width
    ));

    out
}

/// Write every timed invocation as CSV (one row per invocation).
pub fn write_results_csv(path: &Path, results: &[BenchmarkResult]) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for result in results {
        writer.serialize(result)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the per-cell summary as pretty JSON.
pub fn write_summary_json(path: &Path, rows: &[SummaryRow]) -> Result<(), ReportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Printable report of a finished run
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    /// Per-cell statistics
    pub summary: Vec<SummaryRow>,
    /// Cells missing timings
    pub issues: Vec<CellIssue>,
    /// Timed invocations
    pub invocations: usize,
    /// Wall-clock time of the run
    pub wall_clock: Duration,
    /// Width of the box plot
    pub plot_width: usize,
}

impl BenchmarkReport {
    /// Build the report of `run`
    pub fn new(run: &BenchmarkRun) -> Self {
        Self {
            summary: run.summary(),
            issues: run.issues.clone(),
            invocations: run.results.len(),
            wall_clock: run.wall_clock,
            plot_width: DEFAULT_PLOT_WIDTH,
        }
    }

    /// Override the box plot width
    pub fn with_plot_width(mut self, width: usize) -> Self {
        self.plot_width = width;
        self
    }

    /// Count of unsupported cells
    pub fn unsupported_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_unsupported()).count()
    }

    /// Count of cells cut short by the time limit
    pub fn incomplete_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_incomplete()).count()
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();

            output.push_str(&format!("{}\n", style("Load Benchmark Report").bold().cyan()));
            output.push_str(&format!("{}\n\n", style("=====================").cyan()));
            output.push_str(&render_summary_table(&self.summary));
            output.push('\n');
            output.push_str(&render_box_plot(&self.summary, self.plot_width));

            if !self.issues.is_empty() {
                output.push('\n');
                for issue in &self.issues {
                    let tag = if issue.is_incomplete() {
                        style("INCOMPLETE").yellow().bold()
                    } else {
                        style("UNSUPPORTED").red().bold()
                    };
                    output.push_str(&format!("[{}] {}\n", tag, issue));
                }
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} invocations, {} unsupported, {} incomplete in {:.2?}\n",
                style("Summary").bold(),
                style(self.invocations).green(),
                style(self.unsupported_count()).red(),
                style(self.incomplete_count()).yellow(),
                self.wall_clock
            ));

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Load Benchmark Report")?;
        writeln!(f, "=====================")?;
        writeln!(f)?;
        write!(f, "{}", render_summary_table(&self.summary))?;
        writeln!(f)?;
        write!(f, "{}", render_box_plot(&self.summary, self.plot_width))?;

        if !self.issues.is_empty() {
            writeln!(f)?;
            for issue in &self.issues {
                let tag = if issue.is_incomplete() {
                    "INCOMPLETE"
                } else {
                    "UNSUPPORTED"
                };
                writeln!(f, "[{}] {}", tag, issue)?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} invocations, {} unsupported, {} incomplete in {:.2?}",
            self.invocations,
            self.unsupported_count(),
            self.incomplete_count(),
            self.wall_clock
        )
    }
}
