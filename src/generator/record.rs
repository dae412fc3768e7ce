use std::collections::BTreeSet;
use std::fmt;

use crate::schema::{marker_column_names, METADATA_COLUMN_COUNT};

/// One row of the synthetic marker table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRecord {
    /// Marker identifier, assigned in draw order (`id_1..id_N`)
    pub id: String,
    /// Chromosome label (`chr1..chrK`)
    pub chromosome: String,
    /// Genomic coordinate in `[0, max_position)`
    pub position: u32,
    /// One single-byte ASCII call per individual
    pub genotypes: Vec<u8>,
}

impl MarkerRecord {
    /// Number of genotype cells in this row
    pub fn genotype_count(&self) -> usize {
        self.genotypes.len()
    }

    /// The `index`-th genotype call as text (0-based)
    pub fn genotype_str(&self, index: usize) -> Option<&str> {
        self.genotypes
            .get(index..index + 1)
            .and_then(|call| std::str::from_utf8(call).ok())
    }
}

/// Ordered marker rows plus the header they are written under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerTable {
    records: Vec<MarkerRecord>,
    ngenotype_columns: usize,
}

impl MarkerTable {
    pub(super) fn new(records: Vec<MarkerRecord>, ngenotype_columns: usize) -> Self {
        Self {
            records,
            ngenotype_columns,
        }
    }

    /// Rows in table order
    pub fn records(&self) -> &[MarkerRecord] {
        &self.records
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.records.len()
    }

    /// Number of genotype columns
    pub fn num_genotype_columns(&self) -> usize {
        self.ngenotype_columns
    }

    /// Number of columns including metadata
    pub fn num_columns(&self) -> usize {
        METADATA_COLUMN_COUNT + self.ngenotype_columns
    }

    /// Header: `id, chromosome, position, ind_1..ind_G`
    pub fn column_names(&self) -> Vec<String> {
        marker_column_names(self.ngenotype_columns)
    }

    /// Chromosome labels that occur in the table, in string order
    pub fn distinct_chromosomes(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.chromosome.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Whether every adjacent pair is ordered by `(chromosome, position)`
    pub fn is_sorted(&self) -> bool {
        self.records.windows(2).all(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            (a.chromosome.as_str(), a.position) <= (b.chromosome.as_str(), b.position)
        })
    }
}

impl fmt::Display for MarkerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} markers x {} genotype columns on {} chromosomes",
            self.num_rows(),
            self.ngenotype_columns,
            self.distinct_chromosomes().len()
        )
    }
}
