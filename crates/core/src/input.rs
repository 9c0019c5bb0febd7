//! Report input: plain or gzip-compressed text, decoded line by line.
//!
//! Timing reports are frequently stored as `.rpt.gz`. Decompression is chosen
//! either by the `.gz` extension or by sniffing the gzip magic bytes, so callers
//! never need to care which form they were handed.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::bufread::MultiGzDecoder;
use thiserror::Error;

/// First two bytes of every gzip member.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

const READ_BUFFER_BYTES: usize = 256 * 1024;

/// Fatal errors while opening or reading a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to open report {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read report {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Open `path` for line-oriented reading, decompressing gzip transparently.
pub fn open_report(path: &Path) -> Result<Box<dyn BufRead>, ReportError> {
    let file =
        File::open(path).map_err(|source| ReportError::Open { path: path.to_path_buf(), source })?;
    let mut reader = BufReader::with_capacity(READ_BUFFER_BYTES, file);

    let by_extension = path.extension().map(|e| e == "gz").unwrap_or(false);
    let by_magic = {
        let head = reader
            .fill_buf()
            .map_err(|source| ReportError::Read { path: path.to_path_buf(), source })?;
        head.starts_with(&GZIP_MAGIC)
    };

    if by_extension || by_magic {
        log::debug!("reading {} as gzip", path.display());
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

/// Line iterator that never fails on malformed UTF-8.
///
/// Invalid sequences are replaced with U+FFFD. Trailing `\n` and `\r\n` are
/// stripped. I/O errors (including gzip corruption) are passed through.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: Vec::new() }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.ends_with(b"\n") {
                    self.buf.pop();
                    if self.buf.ends_with(b"\r") {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
