use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The primary target directory is missing. Terminal for a run.
    #[error("directory '{}' not found", path.display())]
    DirectoryNotFound { path: PathBuf },
    /// The primary target exists but cannot be listed. Also terminal.
    #[error("cannot list directory '{}': {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("no target directories configured")]
    NoTargets,
}

impl Error {
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFound { path: path.into() }
    }

    pub fn is_directory_not_found(&self) -> bool {
        matches!(self, Self::DirectoryNotFound { .. })
    }
}
