//! Line audit: report every line of a delimited file that carries more than
//! one delimiter.
//!
//! The scan is purely textual. Quoting is ignored, so a quoted field
//! containing the delimiter counts like any other occurrence. Lines end at
//! `\n`, `\r\n` or a lone `\r`. Lines are streamed; the file is never held
//! in memory.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::StoreError;

/// Lines with more delimiters than this are flagged.
pub const MAX_DELIMITERS: usize = 1;

/// A flagged line: 1-based line number and whitespace-trimmed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedLine {
    pub line_number: usize,
    pub content: String,
}

impl fmt::Display for FlaggedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {} → {}", self.line_number, self.content)
    }
}

/// Iterator over the flagged lines of a reader.
pub struct LineAudit<R> {
    reader: R,
    delimiter: char,
    line_number: usize,
    /// Previous line ended in `\r`; a leading `\n` belongs to it.
    after_cr: bool,
}

impl<R: BufRead> LineAudit<R> {
    pub fn new(reader: R, delimiter: char) -> Self {
        Self {
            reader,
            delimiter,
            line_number: 0,
            after_cr: false,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    /// Next line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        let mut started = false;
        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                break;
            }
            if self.after_cr {
                self.after_cr = false;
                if buf[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }
            started = true;
            match buf.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(pos) => {
                    self.after_cr = buf[pos] == b'\r';
                    bytes.extend_from_slice(&buf[..pos]);
                    self.reader.consume(pos + 1);
                    return decode(bytes).map(Some);
                }
                None => {
                    let len = buf.len();
                    bytes.extend_from_slice(buf);
                    self.reader.consume(len);
                }
            }
        }
        if started {
            decode(bytes).map(Some)
        } else {
            Ok(None)
        }
    }
}

fn decode(bytes: Vec<u8>) -> io::Result<String> {
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

impl LineAudit<BufReader<File>> {
    pub fn open(path: &Path, delimiter: char) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        debug!(path = %path.display(), %delimiter, "auditing lines");
        Ok(Self::new(BufReader::new(file), delimiter))
    }
}

impl<R: BufRead> Iterator for LineAudit<R> {
    type Item = Result<FlaggedLine, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_number += 1;
            if line.matches(self.delimiter).count() > MAX_DELIMITERS {
                return Some(Ok(FlaggedLine {
                    line_number: self.line_number,
                    content: line.trim().to_string(),
                }));
            }
        }
    }
}

/// Collect every flagged line of the file at `path`.
pub fn audit_file(path: &Path, delimiter: char) -> Result<Vec<FlaggedLine>, StoreError> {
    LineAudit::open(path, delimiter)?.collect()
}
