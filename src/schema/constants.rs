/// Container format version - follows semantic versioning
pub const CONTAINER_FORMAT_VERSION: &str = "1.0.0";

/// MIME type written as the first (stored) entry of a columnar container
pub const CONTAINER_MIMETYPE: &str = "application/vnd.hapbench.container";

/// File extension of the columnar container fixture
pub const CONTAINER_EXTENSION: &str = "container";

/// Default name of the table object stored inside the container
pub const DEFAULT_TABLE_NAME: &str = "markers";

/// Placeholder call written into every genotype cell
pub const GENOTYPE_PLACEHOLDER: u8 = b'N';

/// Prefix of generated chromosome labels
pub const CHROMOSOME_PREFIX: &str = "chr";

/// Prefix of generated marker identifiers
pub const MARKER_ID_PREFIX: &str = "id_";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "hapbench:format_version";

/// Metadata key for the table object name in Parquet footer
pub const KEY_TABLE_NAME: &str = "hapbench:table_name";

/// Metadata key for the generator seed in Parquet footer
pub const KEY_GENERATOR_SEED: &str = "hapbench:generator_seed";
