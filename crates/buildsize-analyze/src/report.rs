//! Build size report assembly.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use buildsize_core::{
    BUNDLE_NOT_FOUND, BuildSizeError, BuildSizeReport, CompressionAlgorithm, DiskUsage,
    FileRecord, Operation, ReportConfig,
};
use buildsize_scan::{DiskUsageProbe, FileCatalog, default_probe, filter_by_type, largest};

use crate::compression::{CodecSizer, CompressionSizer};

/// Computes [`BuildSizeReport`]s from a build directory.
///
/// The compression sizer and disk usage probe are pluggable so tests and
/// embedders can substitute their own.
#[derive(Clone)]
pub struct BuildSizeAnalyzer {
    sizer: Arc<dyn CompressionSizer>,
    probe: Arc<dyn DiskUsageProbe>,
}

impl BuildSizeAnalyzer {
    /// Create an analyzer with the codec sizer and the platform probe.
    pub fn new() -> Self {
        Self {
            sizer: Arc::new(CodecSizer::new()),
            probe: default_probe(),
        }
    }

    /// Replace the compression sizer.
    pub fn with_sizer(mut self, sizer: Arc<dyn CompressionSizer>) -> Self {
        self.sizer = sizer;
        self
    }

    /// Replace the disk usage probe.
    pub fn with_probe(mut self, probe: Arc<dyn DiskUsageProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Compute a report for the configured build directory.
    ///
    /// Any failure aborts the whole computation and is wrapped with the
    /// resolved build path and bundle type.
    pub async fn compute(&self, config: &ReportConfig) -> Result<BuildSizeReport, BuildSizeError> {
        let bundle_type = config.normalized_bundle_type().to_string();
        let build_path = std::path::absolute(&config.build_path)
            .map_err(|e| BuildSizeError::io(&config.build_path, Operation::ReadDir, e))
            .map_err(|e| e.in_report(&config.build_path, &bundle_type))?;

        self.compute_resolved(&build_path, &bundle_type, config.threads)
            .await
            .map_err(|e| e.in_report(&build_path, &bundle_type))
    }

    async fn compute_resolved(
        &self,
        build_path: &Path,
        bundle_type: &str,
        threads: usize,
    ) -> Result<BuildSizeReport, BuildSizeError> {
        let start = Instant::now();
        debug!(path = %build_path.display(), bundle_type, "computing build sizes");

        let all_files = FileCatalog::with_threads(threads)
            .scan_async(build_path)
            .await?;

        let main_bundle = largest(filter_by_type(&all_files, bundle_type)).cloned();

        // Compression and disk usage are independent of each other
        let probe = self.probe.clone();
        let probe_path = build_path.to_path_buf();
        let disk_usage = blocking(Operation::DiskUsage, move || probe.measure(&probe_path));

        let (main_bundle_size_gzip, main_bundle_size_brotli, build_size_on_disk) =
            match &main_bundle {
                Some(bundle) => {
                    let gzip = self.compress(bundle, CompressionAlgorithm::Gzip);
                    let brotli = self.compress(bundle, CompressionAlgorithm::Brotli);
                    tokio::try_join!(gzip, brotli, disk_usage)?
                }
                None => {
                    debug!(bundle_type, "no main bundle found");
                    (0, 0, disk_usage.await?)
                }
            };

        let report = assemble(
            &all_files,
            main_bundle.as_ref(),
            main_bundle_size_gzip,
            main_bundle_size_brotli,
            build_size_on_disk,
        );

        info!(
            path = %build_path.display(),
            main_bundle = %report.main_bundle_name,
            build_size = report.build_size,
            files = report.build_file_count,
            elapsed = ?start.elapsed(),
            "computed build sizes"
        );

        Ok(report)
    }

    async fn compress(
        &self,
        bundle: &FileRecord,
        algorithm: CompressionAlgorithm,
    ) -> Result<u64, BuildSizeError> {
        let sizer = self.sizer.clone();
        let path = bundle.path.clone();
        blocking(Operation::Compress(algorithm), move || {
            sizer.compressed_size(&path, algorithm)
        })
        .await
    }
}

impl Default for BuildSizeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute a report for `build_path` with the default analyzer.
pub async fn compute_report(
    build_path: impl Into<PathBuf>,
    bundle_type: impl Into<String>,
) -> Result<BuildSizeReport, BuildSizeError> {
    let config = ReportConfig::new(build_path).with_bundle_type(bundle_type);
    BuildSizeAnalyzer::new().compute(&config).await
}

/// Run a blocking step on the blocking pool.
async fn blocking<T, F>(operation: Operation, f: F) -> Result<T, BuildSizeError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, BuildSizeError> + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| BuildSizeError::Task {
        operation,
        message: e.to_string(),
    })?
}

/// Build the report from catalogued files and measured sizes.
fn assemble(
    all_files: &[FileRecord],
    main_bundle: Option<&FileRecord>,
    main_bundle_size_gzip: u64,
    main_bundle_size_brotli: u64,
    build_size_on_disk: DiskUsage,
) -> BuildSizeReport {
    let (main_bundle_name, main_bundle_size) = match main_bundle {
        Some(bundle) => (bundle.name.to_string(), bundle.size),
        None => (BUNDLE_NOT_FOUND.to_string(), 0),
    };

    BuildSizeReport {
        main_bundle_name,
        main_bundle_size,
        main_bundle_size_gzip,
        main_bundle_size_brotli,
        build_size: all_files.iter().map(|f| f.size).sum(),
        build_size_on_disk,
        build_file_count: all_files.len() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_without_bundle() {
        let files = vec![
            FileRecord::new("index.html", "/build/index.html", 2000),
            FileRecord::new("styles.css", "/build/styles.css", 50_000),
        ];
        let report = assemble(&files, None, 0, 0, DiskUsage::Unsupported);

        assert_eq!(report.main_bundle_name, BUNDLE_NOT_FOUND);
        assert_eq!(report.main_bundle_size, 0);
        assert_eq!(report.build_size, 52_000);
        assert_eq!(report.build_file_count, 2);
    }

    #[test]
    fn test_assemble_with_bundle() {
        let files = vec![
            FileRecord::new("main.js", "/build/main.js", 1000),
            FileRecord::new("index.html", "/build/index.html", 200),
        ];
        let report = assemble(&files, Some(&files[0]), 300, 250, DiskUsage::Bytes(8192));

        assert_eq!(report.main_bundle_name, "main.js");
        assert_eq!(report.main_bundle_size, 1000);
        assert_eq!(report.main_bundle_size_gzip, 300);
        assert_eq!(report.main_bundle_size_brotli, 250);
        assert_eq!(report.build_size, 1200);
        assert_eq!(report.build_size_on_disk, DiskUsage::Bytes(8192));
        assert!(report.main_bundle_size <= report.build_size);
    }
}
