use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder, SchemaRef};

use super::columns;
use super::constants::{CONTAINER_FORMAT_VERSION, KEY_FORMAT_VERSION};

/// Arrow type used for categorical (dictionary-encoded) label columns.
pub fn categorical_type() -> DataType {
    DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8))
}

/// Creates the declared schema of the delimited marker table.
///
/// This is the schema a loader is handed when it is allowed to skip type
/// inference. Every column is required; the text fixture never contains
/// empty cells.
///
/// # Example
///
/// ```
/// use hapbench::schema::create_marker_schema;
///
/// let schema = create_marker_schema(4);
/// assert_eq!(schema.fields().len(), 7);
/// ```
pub fn create_marker_schema(ngenotype_columns: usize) -> Schema {
    let mut builder = SchemaBuilder::new();

    builder.push(Field::new(columns::ID, DataType::Utf8, false));
    builder.push(Field::new(columns::CHROMOSOME, DataType::Utf8, false));
    builder.push(Field::new(columns::POSITION, DataType::UInt32, false));

    for index in 1..=ngenotype_columns {
        builder.push(Field::new(
            columns::genotype_column_name(index),
            DataType::Utf8,
            false,
        ));
    }

    builder.finish()
}

/// Creates the declared schema as an Arc (for use with RecordBatch)
pub fn create_marker_schema_arc(ngenotype_columns: usize) -> SchemaRef {
    Arc::new(create_marker_schema(ngenotype_columns))
}

/// Rewrites a schema so that label columns become dictionary-encoded.
///
/// `chromosome` and every `ind_*` column are switched to
/// `Dictionary(Int32, Utf8)`; all other fields are kept as they are.
pub fn to_categorical_schema(schema: &Schema) -> Schema {
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|field| {
            if columns::is_categorical_column(field.name()) {
                field.as_ref().clone().with_data_type(categorical_type())
            } else {
                field.as_ref().clone()
            }
        })
        .collect();

    Schema::new_with_metadata(fields, schema.metadata().clone())
}

/// Creates the all-Utf8 "matrix" schema written into the columnar container.
///
/// The container stores the table as a single-typed matrix, so `position` is
/// coerced to text alongside the label columns.
pub fn create_matrix_schema(column_names: &[String]) -> Schema {
    let fields: Vec<Field> = column_names
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, false))
        .collect();

    let mut metadata = HashMap::new();
    metadata.insert(
        KEY_FORMAT_VERSION.to_string(),
        CONTAINER_FORMAT_VERSION.to_string(),
    );

    Schema::new_with_metadata(fields, metadata)
}
