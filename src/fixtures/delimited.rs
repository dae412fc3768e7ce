//! Tab-separated text rendition of the marker table.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::error::FixtureCause;
use crate::generator::MarkerTable;

#[cfg(windows)]
const LINE_TERMINATOR: Terminator = Terminator::CRLF;
#[cfg(not(windows))]
const LINE_TERMINATOR: Terminator = Terminator::Any(b'\n');

/// Write `table` as unquoted TSV with a header row, then sync it to disk.
///
/// Returns the number of bytes written.
pub fn write_delimited(table: &MarkerTable, path: &Path) -> Result<u64, FixtureCause> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .terminator(LINE_TERMINATOR)
        .from_writer(BufWriter::with_capacity(1 << 20, file));

    writer.write_record(table.column_names())?;

    for record in table.records() {
        let position = record.position.to_string();
        let metadata = [
            record.id.as_bytes(),
            record.chromosome.as_bytes(),
            position.as_bytes(),
        ];
        let calls = record.genotypes.iter().map(std::slice::from_ref);
        writer.write_record(metadata.into_iter().chain(calls))?;
    }

    writer.flush()?;
    let mut buffered = writer.into_inner().map_err(|e| {
        FixtureCause::IoError(io::Error::new(e.error().kind(), e.error().to_string()))
    })?;
    buffered.flush()?;
    let file = buffered
        .into_inner()
        .map_err(|e| FixtureCause::IoError(e.into_error()))?;
    file.sync_all()?;

    Ok(file.metadata()?.len())
}
