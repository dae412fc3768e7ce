//! # Synthetic Marker Generator
//!
//! Builds a HapMap-style marker table: fixed metadata columns followed by one
//! genotype column per individual.
//!
//! The output is a pure function of [`GeneratorConfig`]. Chromosome indices
//! are drawn first for every row, then positions, from a [`StdRng`] seeded
//! with `seed`. Rows are then stably sorted by chromosome *label* (string
//! order, so `chr10` precedes `chr2`) and position.
//!
//! Every genotype cell holds the constant placeholder
//! [`GENOTYPE_PLACEHOLDER`](crate::schema::GENOTYPE_PLACEHOLDER). Load times
//! then depend on table shape only, not on cell values.
//!
//! ```rust
//! use hapbench::generator::{generate, GeneratorConfig};
//!
//! let table = generate(&GeneratorConfig::new(100, 8, 7))?;
//! assert_eq!(table.num_rows(), 100);
//! assert_eq!(table.num_columns(), 11);
//! assert!(table.is_sorted());
//! # Ok::<(), hapbench::generator::GeneratorError>(())
//! ```

mod config;
mod error;
mod record;


pub use config::GeneratorConfig;
pub use error::GeneratorError;
pub use record::{MarkerRecord, MarkerTable};

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::schema::{CHROMOSOME_PREFIX, GENOTYPE_PLACEHOLDER, MARKER_ID_PREFIX};

/// Generate the sorted synthetic marker table described by `config`.
pub fn generate(config: &GeneratorConfig) -> Result<MarkerTable, GeneratorError> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);

    let chromosomes: Vec<u32> = (0..config.nrows)
        .map(|_| rng.random_range(1..=config.nchromosomes))
        .collect();
    let positions: Vec<u32> = (0..config.nrows)
        .map(|_| rng.random_range(0..config.max_position))
        .collect();

    let genotypes = vec![GENOTYPE_PLACEHOLDER; config.ngenotype_columns];

    let mut records: Vec<MarkerRecord> = chromosomes
        .into_iter()
        .zip(positions)
        .enumerate()
        .map(|(i, (chromosome, position))| MarkerRecord {
            id: format!("{}{}", MARKER_ID_PREFIX, i + 1),
            chromosome: format!("{}{}", CHROMOSOME_PREFIX, chromosome),
            position,
            genotypes: genotypes.clone(),
        })
        .collect();

    // Stable: ties on (chromosome, position) keep draw order.
    records.sort_by(|a, b| {
        a.chromosome
            .cmp(&b.chromosome)
            .then(a.position.cmp(&b.position))
    });

    let table = MarkerTable::new(records, config.ngenotype_columns);
    debug!("Generated {} (seed {})", table, config.seed);

    Ok(table)
}
