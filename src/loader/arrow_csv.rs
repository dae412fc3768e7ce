//! Loaders built on the Arrow CSV reader.

use std::path::Path;
use std::sync::Arc;

use arrow::compute::cast;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::SchemaRef;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use super::{
    open_input, Capabilities, InputEncoding, LoadError, LoadHints, LoadedTable, LoaderStrategy,
};
use crate::schema::to_categorical_schema;

/// Batch size when the row count is not known ahead of parsing
pub const DEFAULT_BATCH_SIZE: usize = 8_192;

/// Records sampled for type inference
pub const INFER_SAMPLE_ROWS: usize = 1_000;

/// A configuration of the Arrow CSV reader.
///
/// Which optimizations are applied is fixed at construction and reported by
/// [`capabilities`](LoaderStrategy::capabilities).
#[derive(Debug, Clone)]
pub struct ArrowCsvLoader {
    name: String,
    capabilities: Capabilities,
}

impl ArrowCsvLoader {
    /// Column types inferred from a sample of the data
    pub fn inferred() -> Self {
        Self::with_capabilities("inferred", Capabilities::default().compressed())
    }

    /// Column types taken from the declared schema
    pub fn typed() -> Self {
        Self::with_capabilities(
            "typed",
            Capabilities::default().compressed().type_hints(),
        )
    }

    /// Declared types plus a pre-sized single batch
    pub fn typed_sized() -> Self {
        Self::with_capabilities(
            "typed_sized",
            Capabilities::default()
                .compressed()
                .type_hints()
                .row_count_hint(),
        )
    }

    /// Declared types, pre-sized batch, dictionary-encoded labels
    pub fn typed_sized_categorical() -> Self {
        Self::with_capabilities(
            "typed_sized_categorical",
            Capabilities::default()
                .compressed()
                .type_hints()
                .row_count_hint()
                .categorical(),
        )
    }

    /// Arbitrary combination of optimizations under a custom name
    pub fn with_capabilities(name: impl Into<String>, capabilities: Capabilities) -> Self {
        Self {
            name: name.into(),
            capabilities,
        }
    }

    fn resolve_schema(
        &self,
        path: &Path,
        encoding: InputEncoding,
        hints: &LoadHints,
    ) -> Result<SchemaRef, LoadError> {
        if self.capabilities.uses_type_hints {
            return Ok(hints.schema.clone());
        }

        let (schema, _) = Format::default()
            .with_header(true)
            .with_delimiter(b'\t')
            .infer_schema(open_input(path, encoding)?, Some(INFER_SAMPLE_ROWS))?;
        Ok(Arc::new(schema))
    }

    fn batch_size(&self, hints: &LoadHints) -> usize {
        if self.capabilities.uses_row_count_hint {
            hints
                .nrows
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_BATCH_SIZE)
        } else {
            DEFAULT_BATCH_SIZE
        }
    }
}

impl LoaderStrategy for ArrowCsvLoader {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn load(
        &self,
        path: &Path,
        encoding: InputEncoding,
        hints: &LoadHints,
    ) -> Result<LoadedTable, LoadError> {
        if encoding.is_compressed() && !self.capabilities.supports_compressed_input {
            return Err(LoadError::UnsupportedInput {
                strategy: self.name.clone(),
                encoding,
            });
        }

        let schema = self.resolve_schema(path, encoding, hints)?;

        let reader = ReaderBuilder::new(schema.clone())
            .with_header(true)
            .with_delimiter(b'\t')
            .with_batch_size(self.batch_size(hints))
            .build(open_input(path, encoding)?)?;

        let batches = reader.collect::<Result<Vec<_>, _>>()?;

        if !self.capabilities.emits_categorical {
            return Ok(LoadedTable::new(schema, batches));
        }

        let categorical: SchemaRef = Arc::new(to_categorical_schema(&schema));
        let batches = batches
            .iter()
            .map(|batch| recast_batch(batch, &categorical))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LoadedTable::new(categorical, batches))
    }
}

/// Cast every column whose type differs from `schema`.
fn recast_batch(batch: &RecordBatch, schema: &SchemaRef) -> Result<RecordBatch, ArrowError> {
    let columns = batch
        .columns()
        .iter()
        .zip(schema.fields())
        .map(|(column, field)| {
            if column.data_type() == field.data_type() {
                Ok(column.clone())
            } else {
                cast(column, field.data_type())
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    RecordBatch::try_new(schema.clone(), columns)
}
