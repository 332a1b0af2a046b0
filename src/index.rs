use std::{
    io::{prelude::*, BufReader, SeekFrom},
    ops::Range,
    time::Instant,
};

use tracing::info;

use crate::{error::Error, Result};

/// Contains an in-memory line-index
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Index {
    /// Maps line to seek position in order to seek efficiently. The index within the Vec represents
    /// the line-index in the file
    inner: Vec<u64>,
    /// Offset right behind the last indexed byte
    end: u64,
}

impl Index {
    /// Create a new Index from line offsets and the end offset of the indexed data.
    /// Expects `lines` to be strictly increasing and smaller than `end`.
    pub fn new(lines: Vec<u64>, end: u64) -> Index {
        debug_assert!(lines.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(lines.last().map_or(true, |last| *last < end));
        Self { inner: lines, end }
    }

    /// Build a new index for text within `reader`. The reader gets rewound before and after
    /// scanning. Only one line is held in memory at a time.
    pub fn build<R: Read + Seek>(reader: &mut BufReader<R>) -> Result<Self> {
        let start = Instant::now();
        reader.seek(SeekFrom::Start(0))?;

        let mut line_index: Vec<u64> = Vec::new();
        let mut curr_offset: u64 = 0;

        let mut buff = Vec::with_capacity(1000);

        loop {
            buff.clear();
            let n = reader.read_until(b'\n', &mut buff)?;
            if n == 0 {
                break;
            }

            line_index.push(curr_offset);
            curr_offset += n as u64;
        }

        reader.seek(SeekFrom::Start(0))?;

        info!(
            lines = line_index.len(),
            bytes = curr_offset,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "index built"
        );

        Ok(Self {
            inner: line_index,
            end: curr_offset,
        })
    }

    /// Get the offset at which line `pos` starts
    #[inline]
    pub fn get(&self, pos: usize) -> Result<u64> {
        self.inner
            .get(pos)
            .copied()
            .ok_or(Error::OutOfBounds {
                line: pos,
                total: self.len(),
            })
    }

    /// Returns the byte range of line `pos`, including its terminator if it has one
    pub fn span(&self, pos: usize) -> Result<Range<u64>> {
        let start = self.get(pos)?;
        let end = self.inner.get(pos + 1).copied().unwrap_or(self.end);
        Ok(start..end)
    }

    /// Returns the amount of indexed lines
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no line was indexed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Offset right behind the last indexed byte. Equals the size of the indexed data.
    #[inline]
    pub fn end(&self) -> u64 {
        self.end
    }

    /// All line offsets in order
    #[inline]
    pub fn offsets(&self) -> &[u64] {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn build(text: &str) -> Index {
        let mut reader = BufReader::new(Cursor::new(text.as_bytes()));
        Index::build(&mut reader).unwrap()
    }

    #[test]
    fn test_empty() {
        let index = build("");
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.end(), 0);
        assert!(matches!(
            index.get(0),
            Err(Error::OutOfBounds { line: 0, total: 0 })
        ));
    }

    #[test]
    fn test_blank_lines_and_missing_newline() {
        let index = build("{\"a\":1}\n\n{\"b\":2}");
        assert_eq!(index.offsets(), &[0, 8, 9]);
        assert_eq!(index.end(), 16);
        assert_eq!(index.span(1).unwrap(), 8..9);
        assert_eq!(index.span(2).unwrap(), 9..16);
        assert!(index.get(3).is_err());
    }

    #[test]
    fn test_trailing_newline() {
        let index = build("a\nbb\n");
        assert_eq!(index.offsets(), &[0, 2]);
        assert_eq!(index.span(1).unwrap(), 2..5);
    }

    #[test]
    fn test_only_newlines() {
        let index = build("\n\n\n");
        assert_eq!(index.offsets(), &[0, 1, 2]);
        assert_eq!(index.end(), 3);
    }

    #[test]
    fn test_strictly_increasing() {
        let text: String = (0..500)
            .map(|i| format!("{{\"id\":{}}}\n{}", i, if i % 7 == 0 { "\n" } else { "" }))
            .collect();
        let index = build(&text);

        assert_eq!(index.len(), text.lines().count());
        assert_eq!(index.get(0).unwrap(), 0);
        assert!(index.offsets().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(index.end(), text.len() as u64);
    }

    #[test]
    fn test_build_rewinds() {
        let mut reader = BufReader::new(Cursor::new("one\ntwo\n".as_bytes()));
        Index::build(&mut reader).unwrap();

        let mut first = String::new();
        reader.read_line(&mut first).unwrap();
        assert_eq!(first, "one\n");
    }
}
