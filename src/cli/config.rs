//! TOML configuration file support.
//!
//! Instead of passing many CLI flags, users can keep settings in a file:
//!
//! ```toml
//! # hapbench.toml
//! [dataset]
//! rows = 50000
//! genotypes = 500
//! seed = 7
//!
//! [benchmark]
//! replicates = 8
//! warmup = 1
//! time_limit_secs = 600
//! strategies = ["typed", "typed_sized"]
//!
//! [output]
//! dir = "/scratch/hapbench"
//! keep = true
//! results_csv = "results.csv"
//! ```
//!
//! Precedence: CLI flag, then config file, then profile.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hapbench::fixtures::FixtureConfig;
use hapbench::generator::GeneratorConfig;
use hapbench::harness::HarnessConfig;
use hapbench::pipeline::PipelineConfig;

use super::Profile;

/// Root configuration structure for hapbench.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Synthetic table settings.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Harness settings.
    #[serde(default)]
    pub benchmark: BenchmarkConfig,

    /// Fixture and export locations.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration of the synthetic table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// Number of marker rows.
    pub rows: Option<usize>,

    /// Number of genotype columns.
    pub genotypes: Option<usize>,

    /// Size of the chromosome pool.
    pub chromosomes: Option<u32>,

    /// Exclusive upper bound of positions.
    pub max_position: Option<u32>,

    /// Random seed.
    pub seed: Option<u64>,
}

/// Configuration of the benchmark harness.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchmarkConfig {
    /// Timed invocations per cell.
    pub replicates: Option<usize>,

    /// Untimed invocations per cell.
    pub warmup: Option<usize>,

    /// Wall-clock ceiling in seconds.
    pub time_limit_secs: Option<f64>,

    /// Strategies to run.
    pub strategies: Option<Vec<String>>,
}

/// Configuration of fixture and export locations.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Parent directory of the fixture directory.
    pub dir: Option<PathBuf>,

    /// Keep fixtures after the run.
    pub keep: Option<bool>,

    /// Per-invocation CSV export.
    pub results_csv: Option<PathBuf>,

    /// Summary JSON export.
    pub summary_json: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

/// Values given on the command line; `None` defers to the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub rows: Option<usize>,
    pub genotypes: Option<usize>,
    pub seed: Option<u64>,
    pub replicates: Option<usize>,
    pub time_limit_secs: Option<f64>,
    pub output_dir: Option<PathBuf>,
    pub keep: bool,
    pub strategies: Vec<String>,
    pub results_csv: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}

/// Fully resolved settings of one invocation
#[derive(Debug)]
pub struct Settings {
    pub pipeline: PipelineConfig,
    pub results_csv: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}

/// Merge CLI flags, config file and profile into pipeline settings.
pub fn resolve(cli: &Overrides, file: &Config, profile: Profile) -> Result<Settings> {
    let defaults = GeneratorConfig::default();
    let generator = GeneratorConfig {
        nrows: cli.rows.or(file.dataset.rows).unwrap_or(profile.rows()),
        ngenotype_columns: cli
            .genotypes
            .or(file.dataset.genotypes)
            .unwrap_or(profile.genotype_columns()),
        nchromosomes: file.dataset.chromosomes.unwrap_or(defaults.nchromosomes),
        max_position: file.dataset.max_position.unwrap_or(defaults.max_position),
        seed: cli.seed.or(file.dataset.seed).unwrap_or(defaults.seed),
    };

    let time_limit = match cli.time_limit_secs.or(file.benchmark.time_limit_secs) {
        Some(secs) => Some(
            Duration::try_from_secs_f64(secs)
                .with_context(|| format!("Invalid time limit: {} seconds", secs))?,
        ),
        None => None,
    };
    let harness = HarnessConfig {
        replicates: cli
            .replicates
            .or(file.benchmark.replicates)
            .unwrap_or(profile.replicates()),
        warmup: file.benchmark.warmup.unwrap_or(0),
        time_limit,
        expected_shape: None,
    };

    let mut fixtures = FixtureConfig::default()
        .keep(cli.keep || file.output.keep.unwrap_or(false));
    fixtures.parent_dir = cli.output_dir.clone().or_else(|| file.output.dir.clone());

    let strategies = if cli.strategies.is_empty() {
        file.benchmark.strategies.clone().unwrap_or_default()
    } else {
        cli.strategies.clone()
    };

    Ok(Settings {
        pipeline: PipelineConfig {
            generator,
            fixtures,
            harness,
            strategies,
        },
        results_csv: cli
            .results_csv
            .clone()
            .or_else(|| file.output.results_csv.clone()),
        summary_json: cli
            .summary_json
            .clone()
            .or_else(|| file.output.summary_json.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [dataset]
            rows = 5000
            genotypes = 200
            chromosomes = 22
            seed = 7

            [benchmark]
            replicates = 8
            warmup = 1
            time_limit_secs = 90.5
            strategies = ["typed", "raw_records"]

            [output]
            dir = "/tmp/hapbench"
            keep = true
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.dataset.rows, Some(5_000));
        assert_eq!(config.dataset.genotypes, Some(200));
        assert_eq!(config.dataset.chromosomes, Some(22));
        assert_eq!(config.dataset.seed, Some(7));
        assert_eq!(config.benchmark.replicates, Some(8));
        assert_eq!(config.benchmark.warmup, Some(1));
        assert_eq!(config.benchmark.time_limit_secs, Some(90.5));
        assert_eq!(
            config.benchmark.strategies,
            Some(vec!["typed".to_string(), "raw_records".to_string()])
        );
        assert_eq!(config.output.dir, Some(PathBuf::from("/tmp/hapbench")));
        assert_eq!(config.output.keep, Some(true));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [dataset]
            rows = 10
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.dataset.rows, Some(10));
        assert_eq!(config.dataset.genotypes, None);
        assert_eq!(config.benchmark.replicates, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.dataset.rows, None);
        assert!(config.output.dir.is_none());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_str("[dataset]\nrowz = 3\n").is_err());
    }

    #[test]
    fn test_profile_only() {
        let settings = resolve(&Overrides::default(), &Config::default(), Profile::Quick).unwrap();
        let pipeline = settings.pipeline;
        assert_eq!(pipeline.generator.nrows, 1_000);
        assert_eq!(pipeline.generator.ngenotype_columns, 100);
        assert_eq!(pipeline.generator.seed, 42);
        assert_eq!(pipeline.harness.replicates, 3);
        assert!(pipeline.harness.time_limit.is_none());
        assert!(pipeline.strategies.is_empty());
        assert!(!pipeline.fixtures.keep);
    }

    #[test]
    fn test_precedence() {
        let file = Config::from_str(
            r#"
            [dataset]
            rows = 5000
            genotypes = 200

            [benchmark]
            replicates = 8
            strategies = ["typed"]

            [output]
            keep = true
            results_csv = "file.csv"
            "#,
        )
        .unwrap();
        let cli = Overrides {
            rows: Some(50),
            replicates: Some(2),
            results_csv: Some(PathBuf::from("cli.csv")),
            ..Default::default()
        };

        let settings = resolve(&cli, &file, Profile::Full).unwrap();
        let pipeline = &settings.pipeline;

        // CLI beats file
        assert_eq!(pipeline.generator.nrows, 50);
        assert_eq!(pipeline.harness.replicates, 2);
        assert_eq!(settings.results_csv, Some(PathBuf::from("cli.csv")));
        // File beats profile
        assert_eq!(pipeline.generator.ngenotype_columns, 200);
        assert_eq!(pipeline.strategies, vec!["typed".to_string()]);
        assert!(pipeline.fixtures.keep);
    }

    #[test]
    fn test_negative_time_limit_rejected() {
        let cli = Overrides {
            time_limit_secs: Some(-1.0),
            ..Default::default()
        };
        assert!(resolve(&cli, &Config::default(), Profile::Quick).is_err());
    }
}
