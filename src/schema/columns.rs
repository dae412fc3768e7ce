/// Column names as constants for type safety
/// Unique marker identifier (`id_1..id_N`)
pub const ID: &str = "id";
/// Chromosome label (`chr1..chrK`)
pub const CHROMOSOME: &str = "chromosome";
/// Genomic coordinate of the marker
pub const POSITION: &str = "position";

/// Prefix shared by every per-individual genotype column
pub const GENOTYPE_PREFIX: &str = "ind_";

/// Number of metadata columns that precede the genotype columns
pub const METADATA_COLUMN_COUNT: usize = 3;

/// Name of the `index`-th genotype column (1-based, `ind_1..ind_G`).
pub fn genotype_column_name(index: usize) -> String {
    format!("{}{}", GENOTYPE_PREFIX, index)
}

/// Full ordered header for a table with `ngenotype_columns` genotype columns.
pub fn marker_column_names(ngenotype_columns: usize) -> Vec<String> {
    let mut names = Vec::with_capacity(METADATA_COLUMN_COUNT + ngenotype_columns);
    names.push(ID.to_string());
    names.push(CHROMOSOME.to_string());
    names.push(POSITION.to_string());
    names.extend((1..=ngenotype_columns).map(genotype_column_name));
    names
}

/// Whether a column holds repeated labels that dictionary encoding can compress.
pub fn is_categorical_column(name: &str) -> bool {
    name == CHROMOSOME || name.starts_with(GENOTYPE_PREFIX)
}
