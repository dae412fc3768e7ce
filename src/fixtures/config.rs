use std::path::PathBuf;

use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;

use crate::schema::{columns, DEFAULT_TABLE_NAME};

/// Compression options for the Parquet matrix inside the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD compression (best compression ratio)
    Zstd(i32),
    /// Snappy compression (faster, slightly larger files)
    Snappy,
    /// No compression (fastest write, largest files)
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::Zstd(3)
    }
}

/// Configuration of the columnar container fixture
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Name of the table object inside the container
    pub table_name: String,

    /// Compression type to use
    pub compression: CompressionType,

    /// Target row group size (number of markers per group)
    pub row_group_size: usize,

    /// Whether to write statistics for columns
    pub write_statistics: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            compression: CompressionType::default(),
            row_group_size: 8_192,
            write_statistics: false,
        }
    }
}

impl ContainerConfig {
    /// Create writer properties for a matrix with the given header.
    pub(super) fn to_writer_properties(
        &self,
        column_names: &[String],
        metadata: Vec<(String, String)>,
    ) -> WriterProperties {
        let compression = match self.compression {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or_default())
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        };

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(compression)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size);

        // Labels repeat down every column except the identifier.
        for name in column_names {
            builder = builder.set_column_dictionary_enabled(
                ColumnPath::new(vec![name.clone()]),
                columns::is_categorical_column(name),
            );
        }

        let kv_metadata: Vec<KeyValue> = metadata
            .into_iter()
            .map(|(key, value)| KeyValue {
                key,
                value: Some(value),
            })
            .collect();

        builder.set_key_value_metadata(Some(kv_metadata)).build()
    }
}

/// Where and how fixtures are written
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    /// Parent of the scratch directory (system temp dir when `None`)
    pub parent_dir: Option<PathBuf>,

    /// Keep the scratch directory after the run
    pub keep: bool,

    /// File stem shared by all fixtures
    pub file_stem: String,

    /// Gzip level of the compressed copy (0-9)
    pub gzip_level: u32,

    /// Columnar container settings
    pub container: ContainerConfig,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            parent_dir: None,
            keep: false,
            file_stem: DEFAULT_TABLE_NAME.to_string(),
            gzip_level: 6,
            container: ContainerConfig::default(),
        }
    }
}

impl FixtureConfig {
    /// Fixtures under `parent_dir`, removed at the end of the run
    pub fn in_dir(parent_dir: impl Into<PathBuf>) -> Self {
        Self {
            parent_dir: Some(parent_dir.into()),
            ..Default::default()
        }
    }

    /// Keep (or discard) the directory after the run
    pub fn keep(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }
}
