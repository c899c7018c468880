//! JWalk-based parallel file catalog.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use jwalk::{Parallelism, WalkDir};
use tracing::debug;

use buildsize_core::{BuildSizeError, FileRecord, Operation};

/// Enumerates every regular file under a build directory.
///
/// Sibling subdirectories are read concurrently on the rayon pool. Any read
/// failure aborts the whole catalog; there are no partial results.
#[derive(Debug, Clone, Default)]
pub struct FileCatalog {
    threads: usize,
}

impl FileCatalog {
    /// Create a catalog using the default rayon pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a dedicated pool with `threads` workers (0 = default pool).
    pub fn with_threads(threads: usize) -> Self {
        Self { threads }
    }

    /// Collect all regular files under `root`.
    ///
    /// Records are returned in walk order, which is sorted by file name within
    /// each directory.
    pub fn scan(&self, root: &Path) -> Result<Vec<FileRecord>, BuildSizeError> {
        let start = Instant::now();

        let metadata = std::fs::metadata(root).map_err(|e| BuildSizeError::root(root, e))?;
        if !metadata.is_dir() {
            return Err(BuildSizeError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let parallelism = match self.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            },
            n => Parallelism::RayonNewPool(n),
        };

        let walker = WalkDir::new(root)
            .parallelism(parallelism)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true);

        let mut records = Vec::new();
        for entry_result in walker {
            let entry = entry_result.map_err(|err| walk_error(root, err))?;

            // Symlinks, sockets and devices are not part of the build output
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let metadata = entry.metadata().map_err(|err| walk_error(&path, err))?;
            records.push(FileRecord::new(
                entry.file_name().to_string_lossy().as_ref(),
                path,
                metadata.len(),
            ));
        }

        debug!(
            root = %root.display(),
            files = records.len(),
            elapsed = ?start.elapsed(),
            "catalogued build directory"
        );

        Ok(records)
    }

    /// Async wrapper around [`Self::scan`] that runs the walk on the blocking pool.
    pub async fn scan_async(&self, root: impl Into<PathBuf>) -> Result<Vec<FileRecord>, BuildSizeError> {
        let root = root.into();
        let catalog = self.clone();
        tokio::task::spawn_blocking(move || catalog.scan(&root))
            .await
            .map_err(|e| BuildSizeError::Task {
                operation: Operation::ReadDir,
                message: e.to_string(),
            })?
    }
}

/// Convert a jwalk error into a build size error with path context.
fn walk_error(fallback: &Path, err: jwalk::Error) -> BuildSizeError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| fallback.to_path_buf());
    let source = match err.into_io_error() {
        Some(io) => io,
        None => std::io::Error::other("filesystem loop detected"),
    };
    BuildSizeError::io(path, Operation::ReadDir, source)
}
