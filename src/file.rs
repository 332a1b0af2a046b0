use std::{
    fs,
    io::BufReader,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    bufreader::IndexedBufReader, index::Index, Indexable, IndexableFile, ReadByLine, Result,
};

/// A wrapper around `std::fs::File` which implements `ReadByLine` and holds an index of the
/// lines.
#[derive(Debug)]
pub struct File {
    path: PathBuf,
    reader: IndexedBufReader<fs::File>,
}

impl File {
    /// Open a file and build its index.
    ///
    /// Returns an error if the file can't be opened or an io error occurs while indexing. The file
    /// handle is closed in both cases.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<File> {
        let path = path.as_ref();
        info!(path = %path.display(), "indexing file");

        let inner_file = BufReader::new(fs::File::open(path)?);
        let reader = IndexedBufReader::new_raw(inner_file)?;

        Ok(Self {
            path: path.to_path_buf(),
            reader,
        })
    }

    /// Open a file and use a custom index `index`.
    /// Expects the index to be properly built for the files content.
    pub fn open_custom<P: AsRef<Path>>(path: P, index: Index) -> Result<File> {
        let path = path.as_ref();
        let inner_file = BufReader::new(fs::File::open(path)?);

        Ok(Self {
            path: path.to_path_buf(),
            reader: IndexedBufReader::new(inner_file, index),
        })
    }

    /// Path the file was opened with
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Indexable for File {
    #[inline]
    fn get_index(&self) -> &Index {
        self.reader.get_index()
    }
}

impl IndexableFile for File {
    #[inline(always)]
    fn read_current_line(&mut self, buf: &mut Vec<u8>, line: usize) -> Result<usize> {
        self.reader.read_current_line(buf, line)
    }

    #[inline(always)]
    fn seek_line(&mut self, line: usize) -> Result<()> {
        self.reader.seek_line(line)
    }
}

impl ReadByLine for File {}
