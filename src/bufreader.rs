use std::{
    io::{self, prelude::*, BufReader, Read, SeekFrom},
    ops::Range,
};

use tracing::debug;

use crate::{index::Index, strip_terminator, Indexable, IndexableFile, ReadByLine, Result};

/// A wrapper around `BufReader<R>` which implements `ReadByLine` and holds an index of the
/// lines.
#[derive(Debug)]
pub struct IndexedBufReader<R: Read + Seek> {
    pub reader: BufReader<R>,
    pub(crate) index: Index,
    /// Position of the underlying cursor if known
    pub(crate) curr_pos: Option<u64>,
}

impl<R: Read + Seek> IndexedBufReader<R> {
    /// Creates a new `IndexedBufReader` using a BufReader<R> and an index. The index won't be
    /// validated. Using a malformed index won't return an error but make the IndexedBufReader
    /// useless.
    #[inline(always)]
    pub fn new(reader: BufReader<R>, index: Index) -> IndexedBufReader<R> {
        Self {
            index,
            reader,
            curr_pos: None,
        }
    }

    /// Creates a new `IndexedBufReader` from unindexed data and builds the index.
    pub fn new_raw(mut reader: BufReader<R>) -> Result<IndexedBufReader<R>> {
        let index = Index::build(&mut reader)?;
        let mut new = Self::new(reader, index);
        new.curr_pos = Some(0);
        Ok(new)
    }
}

impl<R: Read + Seek> Indexable for IndexedBufReader<R> {
    #[inline(always)]
    fn get_index(&self) -> &Index {
        &self.index
    }
}

impl<R: Read + Seek> IndexableFile for IndexedBufReader<R> {
    fn read_current_line(&mut self, out_buf: &mut Vec<u8>, line: usize) -> Result<usize> {
        // The span between the current and the next lines start is exactly what we have to read
        let span = self.index.span(line)?;
        let need_read = span_len(&span)?;

        let start = out_buf.len();
        out_buf.resize(start + need_read, 0);

        if let Err(err) = self.reader.read_exact(&mut out_buf[start..]) {
            out_buf.truncate(start);
            self.curr_pos = None;
            return Err(err.into());
        }

        self.curr_pos = Some(span.end);
        debug!(line, offset = span.start, len = need_read, "read line");
        strip_terminator(out_buf, start);
        Ok(out_buf.len() - start)
    }

    fn seek_line(&mut self, line: usize) -> Result<()> {
        let seek_pos = self.get_offset(line)?;

        // We don't need to seek if we're sequencially reading the file
        if self.curr_pos == Some(seek_pos) {
            return Ok(());
        }

        self.curr_pos = None;
        self.reader.seek(SeekFrom::Start(seek_pos))?;
        self.curr_pos = Some(seek_pos);
        Ok(())
    }
}

impl<R: Read + Seek> ReadByLine for IndexedBufReader<R> {}

/// Length of `span` in bytes. Fails if the line doesn't fit into memory on this target.
fn span_len(span: &Range<u64>) -> Result<usize> {
    usize::try_from(span.end - span.start).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("line of {} bytes exceeds addressable memory", span.end - span.start),
        )
        .into()
    })
}
