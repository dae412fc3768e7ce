use serde::{Deserialize, Serialize};

use super::GeneratorError;

/// Parameters of the synthetic marker table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of markers (rows)
    pub nrows: usize,

    /// Number of per-individual genotype columns
    pub ngenotype_columns: usize,

    /// Size of the chromosome label pool (`chr1..chrK`)
    pub nchromosomes: u32,

    /// Exclusive upper bound of sampled positions
    pub max_position: u32,

    /// Seed of the random source
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nrows: 10_000,
            ngenotype_columns: 1_000,
            nchromosomes: 12,
            max_position: 1_000_000,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// Config with the default chromosome pool and position range.
    pub fn new(nrows: usize, ngenotype_columns: usize, seed: u64) -> Self {
        Self {
            nrows,
            ngenotype_columns,
            seed,
            ..Default::default()
        }
    }

    /// Set the chromosome pool size
    pub fn nchromosomes(mut self, nchromosomes: u32) -> Self {
        self.nchromosomes = nchromosomes;
        self
    }

    /// Set the exclusive upper bound of positions
    pub fn max_position(mut self, max_position: u32) -> Self {
        self.max_position = max_position;
        self
    }

    /// Reject zero-sized parameters before any work is done.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        let checks = [
            ("nrows", self.nrows as u64),
            ("ngenotype_columns", self.ngenotype_columns as u64),
            ("nchromosomes", u64::from(self.nchromosomes)),
            ("max_position", u64::from(self.max_position)),
        ];

        for (name, value) in checks {
            if value == 0 {
                return Err(GeneratorError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }
}
