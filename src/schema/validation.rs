use arrow::datatypes::Schema;

use super::columns;

/// Validates that a loaded schema carries the marker table header.
///
/// Column types are not checked: strategies legitimately differ in the types
/// they produce. Only the names and their order are fixed.
pub fn validate_marker_schema(
    schema: &Schema,
    ngenotype_columns: usize,
) -> Result<(), SchemaValidationError> {
    let expected = columns::marker_column_names(ngenotype_columns);

    for (index, name) in expected.iter().enumerate() {
        match schema.index_of(name) {
            Ok(found) if found == index => {}
            Ok(found) => {
                return Err(SchemaValidationError::OutOfOrder {
                    column: name.clone(),
                    expected: index,
                    found,
                });
            }
            Err(_) => return Err(SchemaValidationError::MissingColumn(name.clone())),
        }
    }

    if schema.fields().len() != expected.len() {
        return Err(SchemaValidationError::ColumnCount {
            expected: expected.len(),
            found: schema.fields().len(),
        });
    }

    Ok(())
}

/// Errors that can occur during schema validation
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    /// A required column is missing from the schema
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column is present but not where the header puts it
    #[error("Column '{column}' expected at index {expected}, found at {found}")]
    OutOfOrder {
        /// Name of the misplaced column
        column: String,
        /// Index the header assigns to the column
        expected: usize,
        /// Index the column was found at
        found: usize,
    },

    /// The schema has extra columns
    #[error("Expected {expected} columns, found {found}")]
    ColumnCount {
        /// Number of columns in the header
        expected: usize,
        /// Number of columns in the schema
        found: usize,
    },
}
