use std::path::PathBuf;

use swc_core::common::Span;
use thiserror::Error;

/// Failure while rewriting a single CSS module import.
///
/// `E` is the error type of the exports provider; lookup failures are kept
/// as-is so the host reports the original cause.
#[derive(Debug, Error)]
pub enum RewriteError<E: std::error::Error + 'static> {
    /// The host did not supply the path of the file being compiled.
    #[error("invalid state: `filename` is missing (the host must pass the filename of the file being compiled)")]
    MissingFilename,

    /// Neither `absoluteRootDirPath` nor the host working directory is known.
    #[error("invalid config: `absoluteRootDirPath` is missing and the host did not supply a cwd")]
    MissingRootDir,

    #[error(transparent)]
    Lookup(E),
}

/// A [`RewriteError`] together with the import statement it came from.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct FailedImport<E: std::error::Error + 'static> {
    pub span: Span,
    /// Import source as written, e.g. `./App.module.css`.
    pub specifier: String,
    pub error: RewriteError<E>,
}

/// Failures of the built-in exports providers.
#[derive(Debug, Error)]
pub enum ExportsError {
    #[error("no CSS module exports configured for {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read CSS module exports from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSS module exports in {}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The plugin config JSON could not be understood.
#[derive(Debug, Error)]
#[error("invalid plugin config: {0}")]
pub struct ConfigError(#[from] pub serde_json::Error);
