//! Gzip copy of the delimited fixture.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use super::error::{FixtureCause, FixtureError, FixtureKind};

const CHUNK_SIZE: usize = 64 * 1024;

/// Stream `source` through a gzip encoder into `dest` and sync it to disk.
///
/// Returns the compressed size in bytes.
pub fn derive_gzip(source: &Path, dest: &Path, level: u32) -> Result<u64, FixtureCause> {
    let mut input = BufReader::new(File::open(source)?);
    let output = BufWriter::new(File::create(dest)?);

    let mut encoder = GzEncoder::new(output, Compression::new(level.min(9)));
    io::copy(&mut input, &mut encoder)?;

    let mut buffered = encoder.finish()?;
    buffered.flush()?;
    let file = buffered
        .into_inner()
        .map_err(|e| FixtureCause::IoError(e.into_error()))?;
    file.sync_all()?;

    Ok(file.metadata()?.len())
}

/// Check that `compressed` decompresses to exactly the bytes of `plain`.
pub fn verify_gzip_roundtrip(plain: &Path, compressed: &Path) -> Result<(), FixtureError> {
    let read_err = |e: io::Error| FixtureError::RoundTripMismatch {
        fixture: FixtureKind::Compressed,
        detail: e.to_string(),
    };

    let original = BufReader::new(File::open(plain).map_err(read_err)?);
    let decoded = GzDecoder::new(BufReader::new(File::open(compressed).map_err(read_err)?));

    match first_difference(original, decoded).map_err(read_err)? {
        None => Ok(()),
        Some(offset) => Err(FixtureError::RoundTripMismatch {
            fixture: FixtureKind::Compressed,
            detail: format!("decompressed stream differs at byte {}", offset),
        }),
    }
}

/// Byte offset of the first difference between two streams, if any.
fn first_difference(mut a: impl Read, mut b: impl Read) -> io::Result<Option<u64>> {
    let mut buf_a = vec![0u8; CHUNK_SIZE];
    let mut buf_b = vec![0u8; CHUNK_SIZE];
    let mut offset = 0u64;

    loop {
        let n_a = read_full(&mut a, &mut buf_a)?;
        let n_b = read_full(&mut b, &mut buf_b)?;

        let common = n_a.min(n_b);
        if let Some(i) = (0..common).find(|&i| buf_a[i] != buf_b[i]) {
            return Ok(Some(offset + i as u64));
        }
        if n_a != n_b {
            return Ok(Some(offset + common as u64));
        }
        if n_a == 0 {
            return Ok(None);
        }
        offset += n_a as u64;
    }
}

/// Fill `buf` unless the stream ends first.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
