use std::path::PathBuf;

/// Errors surfaced by the ranking pipeline.
///
/// Only the collaborator boundary can fail (reading corpora and stop lists,
/// writing rankings and snapshots). The numeric stages are total.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Reading a corpus or writing the ranking failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The external stop word list could not be read.
    #[error("failed to read stop word list {path}: {source}")]
    StopWords {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Encoding or decoding the pipeline snapshot failed.
    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] serde_cbor::Error),
    /// The snapshot was written with another table layout.
    #[error("unsupported snapshot version {found} (expected {expected})")]
    SnapshotVersion { found: u32, expected: u32 },
    /// The snapshot decoded, but its tables disagree with each other.
    #[error("inconsistent snapshot: {0}")]
    InvalidSnapshot(String),
    /// The rayon pool could not be configured.
    #[error("thread pool setup failed: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
