//! # hapbench - Load-Time Benchmarks for Wide Genotype Tables
//!
//! `hapbench` measures how long it takes to load a wide, tab-delimited,
//! HapMap-style genotype table into memory with different reading strategies.
//!
//! ## Key Features
//!
//! - **Deterministic Data**: A seeded generator builds the same sorted marker
//!   table for the same parameters, so runs are comparable across machines.
//!
//! - **Three Fixtures**: The table is written as plain TSV, as a gzip copy of
//!   that file, and as a ZIP container holding a Parquet matrix.
//!
//! - **Explicit Strategies**: Each loader declares the optimizations it
//!   applies (declared types, row-count hint, dictionary-encoded labels,
//!   gzip support) as a capability set.
//!
//! - **Complete Matrix**: Every strategy is run against every input. Cells a
//!   strategy cannot handle are reported, never silently dropped.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hapbench::pipeline::{run_pipeline, PipelineConfig};
//! use hapbench::generator::GeneratorConfig;
//! use hapbench::harness::HarnessConfig;
//!
//! let config = PipelineConfig {
//!     generator: GeneratorConfig::new(10_000, 1_000, 42),
//!     harness: HarnessConfig::with_replicates(5),
//!     ..Default::default()
//! };
//!
//! let output = run_pipeline(config)?;
//! println!("{}", output.report());
//! # Ok::<(), hapbench::pipeline::PipelineError>(())
//! ```
//!
//! This writes, for the duration of the run:
//! ```text
//! hapbench-XXXXXX/
//! ├── markers.txt          # id, chromosome, position, ind_1..ind_G
//! ├── markers.txt.gz       # gzip copy
//! └── markers.container    # ZIP: mimetype, manifest.json, tables/markers.parquet
//! ```
//!
//! ## Architecture
//!
//! - [`generator`]: seeded synthetic marker table
//! - [`schema`]: column names and Arrow schemas
//! - [`fixtures`]: scoped fixture directory and the three fixture writers
//! - [`loader`]: the [`LoaderStrategy`](loader::LoaderStrategy) trait and built-in strategies
//! - [`harness`]: benchmark matrix, summary statistics and reports
//! - [`pipeline`]: generate, persist and benchmark in one call
//!
//! ## Table Layout
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | id | Utf8 | `id_1..id_N`, assigned in draw order |
//! | chromosome | Utf8 | `chr1..chrK` |
//! | position | UInt32 | Coordinate in `[0, max_position)` |
//! | ind_1..ind_G | Utf8 | Genotype call per individual (`N`) |

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod fixtures;
pub mod generator;
pub mod harness;
pub mod loader;
pub mod pipeline;
pub mod schema;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::fixtures::{
        FixtureConfig, FixtureError, FixtureSet, FixtureStats, ContainerConfig, ContainerManifest,
    };
    pub use crate::generator::{generate, GeneratorConfig, GeneratorError, MarkerRecord, MarkerTable};
    pub use crate::harness::{
        run_benchmark, summarize, BenchmarkInput, BenchmarkReport, BenchmarkResult, BenchmarkRun,
        CellIssue, HarnessConfig, HarnessError, SummaryRow,
    };
    pub use crate::loader::{
        default_strategies, Capabilities, InputEncoding, LoadError, LoadHints, LoadedTable,
        LoaderStrategy,
    };
    pub use crate::pipeline::{run_pipeline, PipelineConfig, PipelineError, PipelineOutput};
    pub use crate::schema::{create_marker_schema, marker_column_names, validate_marker_schema};
}
