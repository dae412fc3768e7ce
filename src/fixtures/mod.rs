//! # Benchmark Fixtures
//!
//! The on-disk artifacts every timed invocation reads. A [`FixtureSet`] owns a
//! scratch directory and writes three files into it:
//!
//! ```text
//! hapbench-XXXXXX/
//! ├── markers.txt         # tab-separated table with header
//! ├── markers.txt.gz      # gzip copy of markers.txt
//! └── markers.container   # ZIP container with the Parquet matrix
//! ```
//!
//! Every fixture is flushed and synced before [`FixtureSet::write`] returns,
//! and the gzip copy is verified to decompress byte-for-byte to the text file.
//! The directory is removed when the set is dropped unless it was kept.

mod compressed;
mod config;
mod container;
mod delimited;
mod error;


pub use compressed::{derive_gzip, verify_gzip_roundtrip};
pub use config::{CompressionType, ContainerConfig, FixtureConfig};
pub use container::{
    read_container_manifest, read_container_table, table_entry_name, write_container,
    ContainerManifest,
};
pub use delimited::write_delimited;
pub use error::{FixtureCause, FixtureError, FixtureKind};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info};
use tempfile::TempDir;
use uuid::Uuid;

use crate::generator::MarkerTable;
use crate::harness::BenchmarkInput;
use crate::loader::InputEncoding;
use crate::schema::CONTAINER_EXTENSION;

/// Paths of the three fixtures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePaths {
    /// Tab-separated text table
    pub delimited: PathBuf,
    /// Gzip copy of the text table
    pub compressed: PathBuf,
    /// Columnar container
    pub container: PathBuf,
}

impl FixturePaths {
    fn under(root: &Path, stem: &str) -> Self {
        Self {
            delimited: root.join(format!("{}.txt", stem)),
            compressed: root.join(format!("{}.txt.gz", stem)),
            container: root.join(format!("{}.{}", stem, CONTAINER_EXTENSION)),
        }
    }
}

/// Sizes and timing of a completed fixture write
#[derive(Debug, Clone)]
pub struct FixtureStats {
    /// Rows written
    pub rows: usize,
    /// Columns written
    pub columns: usize,
    /// Size of the text table in bytes
    pub delimited_bytes: u64,
    /// Size of the gzip copy in bytes
    pub compressed_bytes: u64,
    /// Size of the container in bytes
    pub container_bytes: u64,
    /// Time spent writing all fixtures
    pub write_time: Duration,
}

impl fmt::Display for FixtureStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fixtures: {} rows x {} columns; text {} bytes, gzip {} bytes, container {} bytes ({:.2?})",
            self.rows,
            self.columns,
            self.delimited_bytes,
            self.compressed_bytes,
            self.container_bytes,
            self.write_time
        )
    }
}

enum FixtureRoot {
    /// Removed when dropped
    Scoped(TempDir),
    /// Left on disk
    Kept(PathBuf),
}

impl FixtureRoot {
    fn path(&self) -> &Path {
        match self {
            FixtureRoot::Scoped(dir) => dir.path(),
            FixtureRoot::Kept(path) => path,
        }
    }
}

/// Scoped directory of benchmark fixtures
pub struct FixtureSet {
    root: FixtureRoot,
    paths: FixturePaths,
    config: FixtureConfig,
    run_id: Uuid,
    stats: Option<FixtureStats>,
}

impl FixtureSet {
    /// Create an empty fixture directory.
    pub fn create(config: FixtureConfig) -> Result<Self, FixtureError> {
        let write_err = FixtureError::write_failure(FixtureKind::Directory);

        let mut builder = tempfile::Builder::new();
        builder.prefix("hapbench-");
        let dir = match &config.parent_dir {
            Some(parent) => fs::create_dir_all(parent).and_then(|_| builder.tempdir_in(parent)),
            None => builder.tempdir(),
        }
        .map_err(write_err)?;

        let root = if config.keep {
            FixtureRoot::Kept(dir.into_path())
        } else {
            FixtureRoot::Scoped(dir)
        };

        let paths = FixturePaths::under(root.path(), &config.file_stem);
        let run_id = Uuid::new_v4();
        debug!("Fixture directory {} (run {})", root.path().display(), run_id);

        Ok(Self {
            root,
            paths,
            config,
            run_id,
            stats: None,
        })
    }

    /// Persist `table` as text, gzip copy and container.
    ///
    /// Any failure is fatal for the run: nothing may be timed against a
    /// partially written fixture set.
    pub fn write(
        &mut self,
        table: &MarkerTable,
        seed: Option<u64>,
    ) -> Result<FixtureStats, FixtureError> {
        let start = Instant::now();

        info!("Writing {}", self.paths.delimited.display());
        let delimited_bytes = write_delimited(table, &self.paths.delimited)
            .map_err(FixtureError::write_failure(FixtureKind::Delimited))?;

        info!("Writing {}", self.paths.compressed.display());
        let compressed_bytes = derive_gzip(
            &self.paths.delimited,
            &self.paths.compressed,
            self.config.gzip_level,
        )
        .map_err(FixtureError::write_failure(FixtureKind::Compressed))?;
        verify_gzip_roundtrip(&self.paths.delimited, &self.paths.compressed)?;

        info!("Writing {}", self.paths.container.display());
        let container_bytes = write_container(
            table,
            &self.paths.container,
            &self.config.container,
            seed,
            self.run_id,
        )
        .map_err(FixtureError::write_failure(FixtureKind::Container))?;

        let stats = FixtureStats {
            rows: table.num_rows(),
            columns: table.num_columns(),
            delimited_bytes,
            compressed_bytes,
            container_bytes,
            write_time: start.elapsed(),
        };
        info!("{}", stats);

        self.stats = Some(stats.clone());
        Ok(stats)
    }

    /// Inputs for the harness: the text table and its gzip copy.
    pub fn inputs(&self) -> Result<Vec<BenchmarkInput>, FixtureError> {
        if self.stats.is_none() {
            return Err(FixtureError::NotWritten);
        }

        Ok(vec![
            BenchmarkInput::new(&self.paths.delimited, InputEncoding::Plain),
            BenchmarkInput::new(&self.paths.compressed, InputEncoding::Gzip),
        ])
    }

    /// Directory holding the fixtures
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Fixture paths
    pub fn paths(&self) -> &FixturePaths {
        &self.paths
    }

    /// Statistics of the last write, if any
    pub fn stats(&self) -> Option<&FixtureStats> {
        self.stats.as_ref()
    }

    /// Identifier recorded in the container manifest
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Whether the directory survives this value
    pub fn is_kept(&self) -> bool {
        matches!(self.root, FixtureRoot::Kept(_))
    }

    /// Detach the directory from this value so it is not removed.
    pub fn keep(self) -> PathBuf {
        match self.root {
            FixtureRoot::Scoped(dir) => dir.into_path(),
            FixtureRoot::Kept(path) => path,
        }
    }
}

impl fmt::Debug for FixtureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureSet")
            .field("root", &self.root.path())
            .field("kept", &self.is_kept())
            .field("run_id", &self.run_id)
            .finish()
    }
}
