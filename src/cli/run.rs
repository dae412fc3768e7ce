use anyhow::{Context, Result};

use hapbench::harness::{write_results_csv, write_summary_json};
use hapbench::pipeline::run_pipeline;

use super::config::{resolve, Config, Overrides};
use super::Profile;

/// Generate fixtures, time every strategy and print the report
pub fn run(overrides: &Overrides, file: &Config, profile: Profile) -> Result<()> {
    let settings = resolve(overrides, file, profile)?;
    let generator = &settings.pipeline.generator;

    println!("hapbench: Genotype Table Load Benchmark");
    println!("=======================================");
    println!("Profile: {}", profile);
    println!(
        "Dataset: {} rows x {} genotype columns (seed {})",
        generator.nrows, generator.ngenotype_columns, generator.seed
    );
    println!("Replicates: {}", settings.pipeline.harness.replicates);
    println!();

    let output = run_pipeline(settings.pipeline).context("Benchmark pipeline failed")?;

    println!("{}", output.stats);
    println!();
    print!("{}", output.report().format_colored());

    let summary = output.run.summary();
    if let Some(path) = &settings.results_csv {
        write_results_csv(path, &output.run.results)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Results written to {}", path.display());
    }
    if let Some(path) = &settings.summary_json {
        write_summary_json(path, &summary)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }

    if output.fixtures.is_kept() {
        println!("Fixtures kept in {}", output.fixtures.keep().display());
    }

    Ok(())
}
