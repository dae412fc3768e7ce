use anyhow::{Context, Result};

use hapbench::pipeline::write_fixtures;

use super::config::{resolve, Config, Overrides};
use super::Profile;

/// Write the fixtures of a run without timing anything
pub fn run(overrides: &Overrides, file: &Config, profile: Profile) -> Result<()> {
    let settings = resolve(overrides, file, profile)?;
    let generator = settings.pipeline.generator;
    let fixtures = settings.pipeline.fixtures.keep(true);

    let (set, stats) =
        write_fixtures(&generator, fixtures).context("Failed to write fixtures")?;

    println!("{}", stats);
    let paths = set.paths().clone();
    let root = set.keep();
    println!("Fixtures written to {}", root.display());
    println!("  {}", paths.delimited.display());
    println!("  {}", paths.compressed.display());
    println!("  {}", paths.container.display());

    Ok(())
}
