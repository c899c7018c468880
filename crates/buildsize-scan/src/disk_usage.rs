//! On-disk size probes.
//!
//! The logical size of a build (sum of file lengths) differs from what the
//! filesystem allocates for it. Probes measure the latter:
//!
//! - [`DuCommandProbe`] runs `du -sk` (the default on unix hosts)
//! - [`BlockCountProbe`] sums `st_blocks` directly (unix only)
//! - [`UnsupportedProbe`] reports [`DiskUsage::Unsupported`] (the default on Windows)

use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use tracing::debug;

use buildsize_core::{BuildSizeError, DiskUsage, Operation};

/// Measures the on-disk allocated size of a directory tree.
pub trait DiskUsageProbe: Send + Sync {
    /// Measure `path`. Blocking; callers on an async runtime should use
    /// `spawn_blocking`.
    fn measure(&self, path: &Path) -> Result<DiskUsage, BuildSizeError>;
}

/// Select the probe for the current platform.
pub fn default_probe() -> Arc<dyn DiskUsageProbe> {
    if cfg!(windows) {
        Arc::new(UnsupportedProbe)
    } else {
        Arc::new(DuCommandProbe::default())
    }
}

/// Runs the host `du` command as a subprocess.
#[derive(Debug, Clone)]
pub struct DuCommandProbe {
    program: String,
}

impl DuCommandProbe {
    /// Use a specific `du` executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DuCommandProbe {
    fn default() -> Self {
        Self::with_program("du")
    }
}

impl DiskUsageProbe for DuCommandProbe {
    fn measure(&self, path: &Path) -> Result<DiskUsage, BuildSizeError> {
        let command_line = format!("{} -sk {}", self.program, path.display());
        let output = Command::new(&self.program)
            .arg("-sk")
            .arg(path)
            .output()
            .map_err(|e| BuildSizeError::io(path, Operation::DiskUsage, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(BuildSizeError::Io {
                path: path.to_path_buf(),
                operation: Operation::DiskUsage,
                source: std::io::Error::other(format!(
                    "`{command_line}` exited with {}: {stderr}",
                    output.status
                )),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let bytes = parse_du_output(&stdout).ok_or_else(|| BuildSizeError::Parse {
            command: command_line.clone(),
            output: stdout.trim().to_string(),
        })?;

        debug!(path = %path.display(), bytes, "measured disk usage");
        Ok(DiskUsage::Bytes(bytes))
    }
}

/// Parse the leading size column of `du -sk` output into bytes.
fn parse_du_output(stdout: &str) -> Option<u64> {
    let kibibytes: u64 = stdout.split_whitespace().next()?.parse().ok()?;
    kibibytes.checked_mul(1024)
}

/// Sums allocated 512-byte blocks of every entry in the tree.
#[cfg(unix)]
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockCountProbe;

#[cfg(unix)]
impl DiskUsageProbe for BlockCountProbe {
    fn measure(&self, path: &Path) -> Result<DiskUsage, BuildSizeError> {
        use std::collections::HashSet;
        use std::os::unix::fs::MetadataExt;

        let mut seen = HashSet::new();
        let mut blocks: u64 = 0;

        for entry_result in jwalk::WalkDir::new(path).skip_hidden(false).follow_links(false) {
            let entry = entry_result.map_err(|err| {
                let entry_path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| path.to_path_buf());
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
                BuildSizeError::io(entry_path, Operation::DiskUsage, source)
            })?;
            let metadata = std::fs::symlink_metadata(entry.path())
                .map_err(|e| BuildSizeError::io(entry.path(), Operation::DiskUsage, e))?;

            // Hardlinked files are allocated once
            if metadata.nlink() > 1 && !seen.insert((metadata.dev(), metadata.ino())) {
                continue;
            }
            blocks += metadata.blocks();
        }

        Ok(DiskUsage::Bytes(blocks * 512))
    }
}

/// Reports that disk usage is unavailable on this host.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedProbe;

impl DiskUsageProbe for UnsupportedProbe {
    fn measure(&self, _path: &Path) -> Result<DiskUsage, BuildSizeError> {
        Ok(DiskUsage::Unsupported)
    }
}
