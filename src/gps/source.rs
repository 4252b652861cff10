use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, TrackerError};

/// Stream of raw NMEA sentence lines
pub trait FixSource {
    /// Next line, `None` when the stream has ended
    fn next_line(&mut self) -> Result<Option<String>>;
}

/// Line source over any buffered reader (serial device, log file, stdin)
pub struct ReaderSource<R: BufRead> {
    reader: R,
    line: String,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl ReaderSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|e| {
            TrackerError::GpsSource(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> FixSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<Option<String>> {
        self.line.clear();
        let read = self.reader.read_line(&mut self.line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(self.line.trim_end().to_string()))
    }
}
