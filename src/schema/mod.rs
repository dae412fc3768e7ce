//! # Marker Table Schema
//!
//! Column names and Arrow schemas for the synthetic HapMap-style marker table.
//!
//! ## Layout
//!
//! | Column | Declared type | Description |
//! |--------|---------------|-------------|
//! | id | Utf8 | Marker identifier (`id_1..id_N`) |
//! | chromosome | Utf8 | Chromosome label (`chr1..chrK`) |
//! | position | UInt32 | Genomic coordinate |
//! | ind_1..ind_G | Utf8 | Per-individual genotype call |
//!
//! The same header is used by every rendition of the table: the declared
//! schema handed to typed loaders, the categorical variant with dictionary
//! encoded labels, and the all-Utf8 matrix stored in the columnar container.

mod builders;
/// Marker table column name constants.
pub mod columns;
mod constants;
mod validation;


pub use builders::{
    categorical_type, create_marker_schema, create_marker_schema_arc, create_matrix_schema,
    to_categorical_schema,
};
pub use columns::*;
pub use constants::*;
pub use validation::{validate_marker_schema, SchemaValidationError};
