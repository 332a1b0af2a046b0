use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// On request for a line outside of the index
    #[error("line {line} is out of range ({total} lines indexed)")]
    OutOfBounds { line: usize, total: usize },

    /// Random selection on a file without lines
    #[error("the index is empty")]
    Empty,

    #[error("invalid command: {0:?}")]
    InvalidCommand(String),

    #[error("line is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("configuration error: {0}")]
    Config(String),
}
