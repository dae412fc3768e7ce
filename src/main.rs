//! # hapbench
//!
//! Command-line front end of the genotype table load benchmark.
//!
//! ## Usage
//!
//! ```bash
//! # Time every strategy on the standard dataset
//! hapbench run
//!
//! # Smaller run with exports
//! hapbench run --profile quick --results-csv results.csv --summary-json summary.json
//!
//! # Write fixtures only
//! hapbench generate --rows 5000 --genotypes 200 --output-dir fixtures/
//!
//! # Inspect a container fixture
//! hapbench info fixtures/hapbench-XXXXXX/markers.container
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
