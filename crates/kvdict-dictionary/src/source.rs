//! Line sources feeding the builder
//!
//! A source yields already-decoded text lines lazily. Opening and reading are
//! the only places construction can fail.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Lazy sequence of lines; each item may fail independently
pub type Lines<'a> = Box<dyn Iterator<Item = io::Result<String>> + 'a>;

/// Provider of raw dictionary lines
pub trait LineSource {
    /// Human-readable name used in diagnostics and errors
    fn name(&self) -> &str;

    /// Open the source and return its lines
    fn open(&self) -> io::Result<Lines<'_>>;
}

/// Newline-delimited UTF-8 file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    /// Create a source reading the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Create a source for `file_name` inside `directory`
    pub fn in_directory(directory: impl AsRef<Path>, file_name: &str) -> Self {
        Self::new(directory.as_ref().join(file_name))
    }

    /// Path being read
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> io::Result<Lines<'_>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(LineReader::new(BufReader::new(file))))
    }
}

/// Splits a byte stream into UTF-8 lines
///
/// A line ends at `\n`, `\r\n` or a lone `\r`. Terminators are not part of
/// the line. Invalid UTF-8 surfaces as an `InvalidData` error on the offending
/// line.
pub(crate) struct LineReader<R> {
    reader: R,
    skip_lf: bool,
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            skip_lf: false,
        }
    }

    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let mut read_any = false;

        loop {
            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(read_any.then_some(line));
            }

            // The '\n' of a "\r\n" pair may arrive in the next buffer
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            read_any = true;
            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    line.extend_from_slice(&available[..end]);
                    self.skip_lf = available[end] == b'\r';
                    self.reader.consume(end + 1);
                    return Ok(Some(line));
                }
                None => {
                    let len = available.len();
                    line.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_line() {
            Ok(Some(bytes)) => Some(
                String::from_utf8(bytes)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            ),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// In-memory lines, used for embedded dictionaries and tests
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    lines: Vec<String>,
}

impl MemorySource {
    /// Create a source from explicit lines
    pub fn new<I, S>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a source by splitting text on line breaks
    ///
    /// Uses the same terminators as [`FileSource`], including a lone `\r`.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        // Splitting valid UTF-8 at ASCII terminators cannot fail
        Self::new(name, LineReader::new(text.as_bytes()).filter_map(Result::ok))
    }
}

impl LineSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> io::Result<Lines<'_>> {
        Ok(Box::new(self.lines.iter().cloned().map(Ok)))
    }
}
