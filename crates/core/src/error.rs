//! Error types for project patching operations.

use std::{io, path::PathBuf, result};

/// Errors that abort a patch call before anything is written.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("required file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("not a Next.js project: missing {} directory", .0.display())]
    NotAHostProject(PathBuf),

    #[error("alias {0:?} is already registered")]
    AliasTaken(String),

    #[error("invalid font request: {0}")]
    InvalidRequest(String),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Whether this error reports a missing precondition rather than an I/O fault.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound(_) | Self::NotAHostProject(_) | Self::AliasTaken(_)
        )
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Outcome of a patch call that got past its preconditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStatus {
    /// The file was edited and written back.
    Applied,
    /// The target state was already present; nothing was written.
    SkippedAlreadyPresent,
}

impl PatchStatus {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Applied, skipped, or failed precondition.
pub type PatchResult = Result<PatchStatus>;
