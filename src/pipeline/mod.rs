//! # Benchmark Pipeline
//!
//! Chains the stages of a run:
//!
//! 1. validate parameters and resolve the strategy selection
//! 2. generate the marker table
//! 3. write, flush and verify every fixture
//! 4. time every strategy against the text fixtures
//!
//! Steps 1 to 3 fail fast with a [`PipelineError`]. Step 4 never fails;
//! per-cell problems land in [`BenchmarkRun::issues`].

mod error;


pub use error::PipelineError;

use log::info;

use crate::fixtures::{FixtureConfig, FixtureSet, FixtureStats};
use crate::generator::{generate, GeneratorConfig};
use crate::harness::{run_benchmark, BenchmarkReport, BenchmarkRun, ExpectedShape, HarnessConfig};
use crate::loader::{select_strategies, LoadHints};

/// Everything a pipeline run needs
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Shape and seed of the synthetic table
    pub generator: GeneratorConfig,
    /// Where fixtures go
    pub fixtures: FixtureConfig,
    /// Replicates, warmup and time limit
    pub harness: HarnessConfig,
    /// Strategy names to run (empty = all)
    pub strategies: Vec<String>,
}

/// Outcome of a pipeline run
#[derive(Debug)]
pub struct PipelineOutput {
    /// Fixture directory; removed when dropped unless kept
    pub fixtures: FixtureSet,
    /// Fixture sizes and write time
    pub stats: FixtureStats,
    /// Timings and cell issues
    pub run: BenchmarkRun,
}

impl PipelineOutput {
    /// Printable report of the run
    pub fn report(&self) -> BenchmarkReport {
        BenchmarkReport::new(&self.run)
    }
}

/// Generate the table and write all fixtures, without timing anything.
pub fn write_fixtures(
    generator: &GeneratorConfig,
    fixtures: FixtureConfig,
) -> Result<(FixtureSet, FixtureStats), PipelineError> {
    generator.validate()?;

    let table = generate(generator)?;
    info!("Generated {}", table);

    let mut set = FixtureSet::create(fixtures)?;
    let stats = set.write(&table, Some(generator.seed))?;
    Ok((set, stats))
}

/// Run the full pipeline described by `config`.
pub fn run_pipeline(config: PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    if config.harness.replicates == 0 {
        return Err(PipelineError::InvalidParameter {
            name: "replicates",
            value: 0,
        });
    }
    config.generator.validate()?;
    let strategies = select_strategies(&config.strategies)?;

    let (fixtures, stats) = write_fixtures(&config.generator, config.fixtures)?;
    let inputs = fixtures.inputs()?;

    let hints = LoadHints::for_table(
        config.generator.ngenotype_columns,
        Some(config.generator.nrows),
    );
    let harness = HarnessConfig {
        expected_shape: Some(ExpectedShape {
            rows: config.generator.nrows,
            genotype_columns: config.generator.ngenotype_columns,
        }),
        ..config.harness
    };

    let run = run_benchmark(&strategies, &inputs, &hints, &harness);

    Ok(PipelineOutput {
        fixtures,
        stats,
        run,
    })
}
