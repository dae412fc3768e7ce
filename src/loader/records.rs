//! Loader built on the `csv` crate's record reader.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use csv::{ReaderBuilder, StringRecord};

use super::{Capabilities, InputEncoding, LoadError, LoadHints, LoadedTable, LoaderStrategy};

/// Reads the plain text file record by record into string columns.
///
/// No type inference, no hints, and no decompression: the file is opened
/// directly by path, so gzip input is rejected.
#[derive(Debug, Clone, Default)]
pub struct RawRecordsLoader;

impl RawRecordsLoader {
    /// Registry name
    pub const NAME: &'static str = "raw_records";

    /// Create the loader
    pub fn new() -> Self {
        Self
    }
}

impl LoaderStrategy for RawRecordsLoader {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    fn load(
        &self,
        path: &Path,
        encoding: InputEncoding,
        _hints: &LoadHints,
    ) -> Result<LoadedTable, LoadError> {
        if encoding.is_compressed() {
            return Err(LoadError::UnsupportedInput {
                strategy: Self::NAME.to_string(),
                encoding,
            });
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .quoting(false)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let mut builders: Vec<StringBuilder> =
            headers.iter().map(|_| StringBuilder::new()).collect();

        let mut record = StringRecord::new();
        while reader.read_record(&mut record)? {
            for (builder, field) in builders.iter_mut().zip(record.iter()) {
                builder.append_value(field);
            }
        }

        let schema = Arc::new(Schema::new(
            headers
                .iter()
                .map(|name| Field::new(name, DataType::Utf8, false))
                .collect::<Vec<_>>(),
        ));
        let columns: Vec<ArrayRef> = builders
            .iter_mut()
            .map(|builder| Arc::new(builder.finish()) as ArrayRef)
            .collect();

        let batch = RecordBatch::try_new(schema.clone(), columns)?;
        Ok(LoadedTable::new(schema, vec![batch]))
    }
}
