use std::collections::HashMap;

use serde::Serialize;

use super::BenchmarkResult;
use crate::loader::InputEncoding;

/// Distribution of load times for one (strategy, input) cell, in seconds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Strategy of the cell
    pub strategy_name: String,
    /// Input encoding of the cell
    pub input: InputEncoding,
    /// Number of timings
    pub count: usize,
    /// Fastest load
    pub min: f64,
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Third quartile
    pub q3: f64,
    /// Slowest load
    pub max: f64,
}

impl SummaryRow {
    /// Grouping label: `strategy/input`
    pub fn label(&self) -> String {
        format!("{}/{}", self.strategy_name, self.input)
    }
}

/// Quantile `p` of ascending `sorted` values, interpolating linearly between
/// order statistics. `sorted` must not be empty.
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lower = h.floor() as usize;
    let upper = h.ceil() as usize;
    sorted[lower] + (h - lower as f64) * (sorted[upper] - sorted[lower])
}

/// Summarize results per (strategy, input), in first-seen order.
pub fn summarize(results: &[BenchmarkResult]) -> Vec<SummaryRow> {
    let mut order: Vec<(&str, InputEncoding)> = Vec::new();
    let mut groups: HashMap<(&str, InputEncoding), Vec<f64>> = HashMap::new();

    for result in results {
        let key = (result.strategy_name.as_str(), result.input);
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(result.elapsed.as_secs_f64());
    }

    order
        .into_iter()
        .filter_map(|key| {
            let mut times = groups.remove(&key)?;
            times.sort_by(f64::total_cmp);

            Some(SummaryRow {
                strategy_name: key.0.to_string(),
                input: key.1,
                count: times.len(),
                min: times[0],
                q1: quantile(&times, 0.25),
                median: quantile(&times, 0.5),
                mean: times.iter().sum::<f64>() / times.len() as f64,
                q3: quantile(&times, 0.75),
                max: times[times.len() - 1],
            })
        })
        .collect()
}
