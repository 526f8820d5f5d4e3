use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("input file '{}' not found or is not a regular file", .0.display())]
    InputNotFound(PathBuf),

    /// Reading the bundle failed partway through. Units already written stay on disk.
    #[error("failed to read input at line {line}: {source}")]
    Read { line: usize, source: io::Error },

    #[error("failed to write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("refusing to write outside the output root: '{}'", .0.display())]
    UnsafePath(PathBuf),

    #[error("root prefix must not be empty")]
    EmptyRoot,

    #[error("invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether the error only concerns a single output unit.
    /// The extraction pass logs these and moves on to the next segment.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Write { .. } | Error::UnsafePath(_))
    }
}
