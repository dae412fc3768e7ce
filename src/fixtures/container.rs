//! Columnar container fixture.
//!
//! ```text
//! {stem}.container (ZIP archive)
//! ├── mimetype                  # CONTAINER_MIMETYPE (stored, first entry)
//! ├── manifest.json             # Table name, shape, provenance (deflated)
//! └── tables/{name}.parquet     # The table as an all-Utf8 matrix (stored)
//! ```
//!
//! The Parquet entry is stored uncompressed in the archive; Parquet applies
//! its own page compression.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::config::ContainerConfig;
use super::error::{FixtureCause, FixtureError};
use crate::generator::{MarkerRecord, MarkerTable};
use crate::schema::{
    create_matrix_schema, CONTAINER_FORMAT_VERSION, CONTAINER_MIMETYPE, KEY_FORMAT_VERSION,
    KEY_GENERATOR_SEED, KEY_TABLE_NAME,
};

const MANIFEST_ENTRY: &str = "manifest.json";
const MIMETYPE_ENTRY: &str = "mimetype";

/// Human-readable description of the stored table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerManifest {
    /// Container format version
    pub format_version: String,
    /// Name of the table object
    pub table_name: String,
    /// Archive path of the Parquet entry
    pub table_entry: String,
    /// Number of rows in the table
    pub num_rows: usize,
    /// Number of columns in the table
    pub num_columns: usize,
    /// Seed the table was generated with, when known
    pub generator_seed: Option<u64>,
    /// Identifier of the fixture set that wrote this container
    pub run_id: Uuid,
    /// Write time
    pub created_at: DateTime<Utc>,
}

/// Archive path of the table object called `table_name`.
pub fn table_entry_name(table_name: &str) -> String {
    format!("tables/{}.parquet", table_name)
}

/// Write `table` into a ZIP container at `path` and sync it to disk.
///
/// Returns the container size in bytes.
pub fn write_container(
    table: &MarkerTable,
    path: &Path,
    config: &ContainerConfig,
    seed: Option<u64>,
    run_id: Uuid,
) -> Result<u64, FixtureCause> {
    let parquet_data = encode_matrix(table, config, seed)?;

    let manifest = ContainerManifest {
        format_version: CONTAINER_FORMAT_VERSION.to_string(),
        table_name: config.table_name.clone(),
        table_entry: table_entry_name(&config.table_name),
        num_rows: table.num_rows(),
        num_columns: table.num_columns(),
        generator_seed: seed,
        run_id,
        created_at: Utc::now(),
    };
    let manifest_json = serde_json::to_string_pretty(&manifest)?;

    let file = File::create(path)?;
    let mut zip_writer = ZipWriter::new(BufWriter::new(file));

    // mimetype MUST be the first, uncompressed entry
    let stored = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .unix_permissions(0o644);
    zip_writer.start_file(MIMETYPE_ENTRY, stored)?;
    zip_writer.write_all(CONTAINER_MIMETYPE.as_bytes())?;

    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);
    zip_writer.start_file(MANIFEST_ENTRY, deflated)?;
    zip_writer.write_all(manifest_json.as_bytes())?;

    // Large tables exceed the 4 GiB entry limit without zip64
    let stored = stored.large_file(parquet_data.len() as u64 >= u32::MAX as u64);
    zip_writer.start_file(manifest.table_entry.as_str(), stored)?;
    zip_writer.write_all(&parquet_data)?;

    let mut buffered = zip_writer.finish()?;
    buffered.flush()?;
    let file = buffered
        .into_inner()
        .map_err(|e| FixtureCause::IoError(e.into_error()))?;
    file.sync_all()?;

    Ok(file.metadata()?.len())
}

/// Encode the table as an all-Utf8 Parquet matrix in memory.
fn encode_matrix(
    table: &MarkerTable,
    config: &ContainerConfig,
    seed: Option<u64>,
) -> Result<Vec<u8>, FixtureCause> {
    let column_names = table.column_names();
    let schema: SchemaRef = Arc::new(create_matrix_schema(&column_names));

    let mut metadata = vec![
        (
            KEY_FORMAT_VERSION.to_string(),
            CONTAINER_FORMAT_VERSION.to_string(),
        ),
        (KEY_TABLE_NAME.to_string(), config.table_name.clone()),
    ];
    if let Some(seed) = seed {
        metadata.push((KEY_GENERATOR_SEED.to_string(), seed.to_string()));
    }
    let props = config.to_writer_properties(&column_names, metadata);

    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, schema.clone(), Some(props))?;

    for chunk in table.records().chunks(config.row_group_size.max(1)) {
        let batch = matrix_batch(chunk, table.num_genotype_columns(), &schema)?;
        writer.write(&batch)?;
    }
    writer.close()?;

    Ok(buffer)
}

/// One RecordBatch of the matrix; every value rendered as text.
fn matrix_batch(
    records: &[MarkerRecord],
    ngenotype_columns: usize,
    schema: &SchemaRef,
) -> Result<RecordBatch, FixtureCause> {
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());

    arrays.push(Arc::new(StringArray::from_iter_values(
        records.iter().map(|r| r.id.as_str()),
    )));
    arrays.push(Arc::new(StringArray::from_iter_values(
        records.iter().map(|r| r.chromosome.as_str()),
    )));
    arrays.push(Arc::new(StringArray::from_iter_values(
        records.iter().map(|r| r.position.to_string()),
    )));

    for index in 0..ngenotype_columns {
        arrays.push(Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.genotype_str(index).unwrap_or_default()),
        )));
    }

    Ok(RecordBatch::try_new(schema.clone(), arrays)?)
}

fn open_archive(path: &Path) -> Result<ZipArchive<File>, FixtureError> {
    let file = File::open(path).map_err(FixtureError::read_failure)?;
    let mut archive = ZipArchive::new(file).map_err(FixtureError::read_failure)?;

    let mut mimetype = String::new();
    archive
        .by_name(MIMETYPE_ENTRY)
        .map_err(FixtureError::read_failure)?
        .read_to_string(&mut mimetype)
        .map_err(FixtureError::read_failure)?;
    if mimetype != CONTAINER_MIMETYPE {
        return Err(FixtureError::InvalidContainer(format!(
            "unexpected mimetype '{}'",
            mimetype
        )));
    }

    Ok(archive)
}

/// Read the manifest of a container.
pub fn read_container_manifest(path: &Path) -> Result<ContainerManifest, FixtureError> {
    let mut archive = open_archive(path)?;
    let entry = archive
        .by_name(MANIFEST_ENTRY)
        .map_err(FixtureError::read_failure)?;
    serde_json::from_reader(entry).map_err(FixtureError::read_failure)
}

/// Read the stored table back as Arrow record batches.
pub fn read_container_table(
    path: &Path,
) -> Result<(ContainerManifest, Vec<RecordBatch>), FixtureError> {
    let manifest = read_container_manifest(path)?;
    let mut archive = open_archive(path)?;

    let mut data = Vec::new();
    archive
        .by_name(&manifest.table_entry)
        .map_err(FixtureError::read_failure)?
        .read_to_end(&mut data)
        .map_err(FixtureError::read_failure)?;

    let reader = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(data))
        .map_err(FixtureError::read_failure)?
        .build()
        .map_err(FixtureError::read_failure)?;

    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(FixtureError::read_failure)?;

    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    if rows != manifest.num_rows {
        return Err(FixtureError::InvalidContainer(format!(
            "manifest declares {} rows, table holds {}",
            manifest.num_rows, rows
        )));
    }

    Ok((manifest, batches))
}
