//! # Loader Strategies
//!
//! A loader strategy is one configuration of a table-reading routine. Each
//! strategy declares which optimizations it applies as a [`Capabilities`]
//! value instead of hiding them behind optional arguments:
//!
//! | Strategy | Type hints | Row hint | Categorical | Gzip |
//! |----------|-----------|----------|-------------|------|
//! | `inferred` | no | no | no | yes |
//! | `typed` | yes | no | no | yes |
//! | `typed_sized` | yes | yes | no | yes |
//! | `typed_sized_categorical` | yes | yes | yes | yes |
//! | `raw_records` | no | no | no | no |
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use hapbench::loader::{ArrowCsvLoader, InputEncoding, LoadHints, LoaderStrategy};
//!
//! let hints = LoadHints::for_table(1_000, Some(10_000));
//! let table = ArrowCsvLoader::typed().load(
//!     Path::new("markers.txt.gz"),
//!     InputEncoding::Gzip,
//!     &hints,
//! )?;
//! println!("{} x {}", table.num_rows(), table.num_columns());
//! # Ok::<(), hapbench::loader::LoadError>(())
//! ```

mod arrow_csv;
mod error;
mod records;
mod registry;

#[cfg(test)]
mod tests;

pub use arrow_csv::{ArrowCsvLoader, DEFAULT_BATCH_SIZE, INFER_SAMPLE_ROWS};
pub use error::LoadError;
pub use records::RawRecordsLoader;
pub use registry::{default_strategies, select_strategies, strategy_names};

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::compute::concat_batches;
use arrow::datatypes::SchemaRef;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};

use crate::schema::create_marker_schema_arc;

/// Byte encoding of a fixture file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputEncoding {
    /// Uncompressed text
    Plain,
    /// Gzip stream
    Gzip,
}

impl InputEncoding {
    /// Guess the encoding from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => InputEncoding::Gzip,
            _ => InputEncoding::Plain,
        }
    }

    /// Whether the bytes must be decompressed before parsing
    pub fn is_compressed(&self) -> bool {
        matches!(self, InputEncoding::Gzip)
    }
}

impl fmt::Display for InputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEncoding::Plain => write!(f, "plain"),
            InputEncoding::Gzip => write!(f, "gzip"),
        }
    }
}

/// Optimizations a strategy applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Can read gzip input
    pub supports_compressed_input: bool,
    /// Parses with the declared schema instead of inferring types
    pub uses_type_hints: bool,
    /// Sizes its buffers from the expected row count
    pub uses_row_count_hint: bool,
    /// Materializes label columns as dictionaries
    pub emits_categorical: bool,
}

impl Capabilities {
    /// Enable gzip input
    pub fn compressed(mut self) -> Self {
        self.supports_compressed_input = true;
        self
    }

    /// Enable declared column types
    pub fn type_hints(mut self) -> Self {
        self.uses_type_hints = true;
        self
    }

    /// Enable row-count pre-sizing
    pub fn row_count_hint(mut self) -> Self {
        self.uses_row_count_hint = true;
        self
    }

    /// Enable dictionary-encoded labels
    pub fn categorical(mut self) -> Self {
        self.emits_categorical = true;
        self
    }

    /// Whether an input of `encoding` can be handed to the strategy
    pub fn accepts(&self, encoding: InputEncoding) -> bool {
        !encoding.is_compressed() || self.supports_compressed_input
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |on: bool| if on { "yes" } else { "no" };
        write!(
            f,
            "types={} rows={} categorical={} gzip={}",
            if self.uses_type_hints { "declared" } else { "inferred" },
            if self.uses_row_count_hint { "hinted" } else { "unknown" },
            flag(self.emits_categorical),
            flag(self.supports_compressed_input)
        )
    }
}

/// What is known about a fixture before it is parsed
#[derive(Debug, Clone)]
pub struct LoadHints {
    /// Declared column types
    pub schema: SchemaRef,
    /// Expected number of data rows
    pub nrows: Option<usize>,
}

impl LoadHints {
    /// Hints for a marker table with `ngenotype_columns` genotype columns
    pub fn for_table(ngenotype_columns: usize, nrows: Option<usize>) -> Self {
        Self {
            schema: create_marker_schema_arc(ngenotype_columns),
            nrows,
        }
    }
}

/// A fully materialized in-memory table
#[derive(Debug, Clone)]
pub struct LoadedTable {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl LoadedTable {
    /// Wrap record batches that share `schema`
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    /// Table schema
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Record batches in file order
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Number of data rows
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(|b| b.num_rows()).sum()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    /// Concatenate all batches into one
    pub fn to_single_batch(&self) -> Result<RecordBatch, ArrowError> {
        concat_batches(&self.schema, &self.batches)
    }
}

/// One configuration of a table-reading routine under benchmark.
pub trait LoaderStrategy {
    /// Stable identifier used in results and reports
    fn name(&self) -> &str;

    /// Optimizations this strategy applies
    fn capabilities(&self) -> Capabilities;

    /// Read the fixture at `path` into memory.
    ///
    /// Every call must open the file afresh; nothing may be cached between
    /// calls.
    fn load(
        &self,
        path: &Path,
        encoding: InputEncoding,
        hints: &LoadHints,
    ) -> Result<LoadedTable, LoadError>;
}

/// Open a fixture as a byte stream, decompressing gzip input.
pub fn open_input(path: &Path, encoding: InputEncoding) -> Result<Box<dyn Read>, LoadError> {
    let file = File::open(path)?;
    Ok(match encoding {
        InputEncoding::Plain => Box::new(file),
        InputEncoding::Gzip => Box::new(GzDecoder::new(file)),
    })
}
