//! Compression-aware opening of POR catalog files.
//!
//! The file suffix determines the codec: `.bz2` is bzip2-compressed,
//! `.gz` is gzip-compressed, and `.csv` is read as-is.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;

use crate::error::{ParseError, Result};

/// Open a POR catalog file, transparently decompressing it based on its
/// file extension.
pub fn open_por_file(path: impl AsRef<Path>) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ParseError::FileNotFound(path.display().to_string())
        } else {
            ParseError::Io(e)
        }
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("bz2") => Ok(Box::new(BufReader::new(BzDecoder::new(file)))),
        Some("gz") => Ok(Box::new(BufReader::new(GzDecoder::new(file)))),
        Some("csv") => Ok(Box::new(BufReader::new(file))),
        other => Err(ParseError::FileExtensionUnknown(
            other.unwrap_or("").to_string(),
        )),
    }
}

/// Wrap an arbitrary [`Read`] source as a plain (uncompressed) POR stream,
/// used by callers (e.g. a test, or a REPL reading from a buffer already in
/// memory) that have already resolved compression themselves.
pub fn plain_reader<R: Read + 'static>(reader: R) -> Box<dyn BufRead> {
    Box::new(BufReader::new(reader))
}
