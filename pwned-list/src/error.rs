use std::path::PathBuf;

use crate::record::RECORD_SIZE;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("hash {index} contained characters other than [0-9A-F]")]
    InvalidCharacter { index: u64 },

    #[error("hash {index} didn't end with CR + LF")]
    MissingTerminator { index: u64 },

    #[error("file truncated: {trailing} trailing bytes after hash {records}")]
    Truncated { records: u64, trailing: usize },

    #[error("file size {size} not a multiple of {}", RECORD_SIZE)]
    Misaligned { size: u64 },

    #[error("invalid hash {0:?}: expected 40 hexadecimal characters")]
    InvalidSearchKey(String),
}

impl Error {
    /// True for failures caused by the content of a record rather than by I/O.
    pub fn is_format_violation(&self) -> bool {
        matches!(
            self,
            Error::InvalidCharacter { .. } | Error::MissingTerminator { .. } | Error::Truncated { .. }
        )
    }
}
