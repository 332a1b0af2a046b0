//!A simple library to index large JSONL files by their lines and read any line directly

/// Basic implementation for std::io::BufReader
pub mod bufreader;
pub mod config;
pub mod error;
/// A wrapper around std::fs::File which implements ReadByLine
pub mod file;
/// The index of files
pub mod index;
/// Two level JSON rendering of lines
pub mod render;
/// The interactive query loop
pub mod session;

pub use bufreader::IndexedBufReader;
pub use error::Error;
pub use file::File;
pub use index::Index;
pub use session::{Command, Session, SessionState};

use std::ops::Range;

use rand::Rng;
use tracing::debug;

pub type Result<T> = std::result::Result<T, error::Error>;

pub trait Indexable {
    /// Returns a reference to the files index.
    fn get_index(&self) -> &Index;

    /// Returns the total amount of lines in the file.
    #[inline]
    fn total_lines(&self) -> usize {
        self.get_index().len()
    }
}

pub trait IndexableFile: Indexable {
    /// Should read line `line` from the current position, omitting the terminator. Returns the
    /// amount of bytes appended to `buf`.
    fn read_current_line(&mut self, buf: &mut Vec<u8>, line: usize) -> Result<usize>;

    /// Should seek the file to the given line `line`. Must fail without seeking if `line` is not
    /// indexed.
    fn seek_line(&mut self, line: usize) -> Result<()>;

    /// Should return the offset to seek to given the line-index
    #[inline(always)]
    fn get_offset(&self, line: usize) -> Result<u64> {
        self.get_index().get(line)
    }
}

/// A trait defining behavior for reading certain lines directly from indexed files.
pub trait ReadByLine: IndexableFile {
    /// Reads the given line
    fn read_line(&mut self, line: usize) -> Result<String> {
        let mut read_data = Vec::new();
        self.read_line_raw(line, &mut read_data)?;
        Ok(String::from_utf8(read_data)?)
    }

    /// Reads the given line and appends it to `buf`
    fn read_line_raw(&mut self, line: usize, buf: &mut Vec<u8>) -> Result<usize> {
        self.seek_line(line)?;
        self.read_current_line(buf, line)
    }

    /// Returns the byte range of `line` within the file, terminator included
    #[inline]
    fn line_span(&self, line: usize) -> Result<Range<u64>> {
        self.get_index().span(line)
    }

    /// Picks a uniformly distributed line and reads it. Returns the picked line together with its
    /// content.
    fn read_random<G: Rng>(&mut self, rng: &mut G) -> Result<(usize, String)> {
        let total = self.total_lines();
        if total == 0 {
            return Err(error::Error::Empty);
        }

        let line = rng.gen_range(0..total);
        debug!(line, total, "picked random line");
        Ok((line, self.read_line(line)?))
    }
}

/// Truncates the line terminator (`\n` or `\r\n`) from the data appended to `buf` after `start`
#[inline]
pub(crate) fn strip_terminator(buf: &mut Vec<u8>, start: usize) {
    if buf.len() > start && buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.len() > start && buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}
