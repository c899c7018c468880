//! Error types for build size computation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

/// Compression codec used when sizing the main bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// Gzip (deflate) at the default level.
    Gzip,
    /// Brotli at the default quality.
    Brotli,
}

/// Step that was running when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ReadDir,
    ReadMetadata,
    ReadFile,
    Compress(CompressionAlgorithm),
    DiskUsage,
    CreateHeader,
    AppendRow,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadDir => f.write_str("reading directory"),
            Self::ReadMetadata => f.write_str("reading metadata"),
            Self::ReadFile => f.write_str("reading file"),
            Self::Compress(algorithm) => write!(f, "compressing with {algorithm}"),
            Self::DiskUsage => f.write_str("measuring disk usage"),
            Self::CreateHeader => f.write_str("creating CSV header"),
            Self::AppendRow => f.write_str("appending CSV row"),
        }
    }
}

/// Errors that can occur while computing or recording build sizes.
#[derive(Debug, Error)]
pub enum BuildSizeError {
    /// Build path does not exist.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Root path is not a directory.
    #[error("Build path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        path: PathBuf,
        operation: Operation,
        #[source]
        source: std::io::Error,
    },

    /// Subprocess output could not be parsed as a byte count.
    #[error("Could not parse output of `{command}`: {output:?}")]
    Parse { command: String, output: String },

    /// A blocking worker failed before returning a result.
    #[error("Background task failed while {operation}: {message}")]
    Task {
        operation: Operation,
        message: String,
    },

    /// Context wrapper added by the report orchestrator.
    #[error("Error while getting build sizes for {path} (bundle type `{bundle_type}`)")]
    Report {
        path: PathBuf,
        bundle_type: String,
        #[source]
        source: Box<BuildSizeError>,
    },
}

impl BuildSizeError {
    /// Create an I/O error with path and operation context.
    pub fn io(path: impl Into<PathBuf>, operation: Operation, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation,
            source,
        }
    }

    /// Create an error for a failed lookup of the build root.
    ///
    /// Only a missing root becomes [`Self::NotFound`]; a missing file or
    /// program further in stays an [`Self::Io`] error.
    pub fn root(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::io(path, Operation::ReadMetadata, source),
        }
    }

    /// Wrap this error with report context.
    pub fn in_report(self, path: impl Into<PathBuf>, bundle_type: impl Into<String>) -> Self {
        Self::Report {
            path: path.into(),
            bundle_type: bundle_type.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error with all report context removed.
    pub fn root_cause(&self) -> &BuildSizeError {
        match self {
            Self::Report { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The offending path, if the underlying error carries one.
    pub fn path(&self) -> Option<&Path> {
        match self.root_cause() {
            Self::NotFound { path } | Self::NotADirectory { path } | Self::Io { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }

    /// Check whether the underlying error is a missing path.
    pub fn is_not_found(&self) -> bool {
        matches!(self.root_cause(), Self::NotFound { .. })
    }
}
