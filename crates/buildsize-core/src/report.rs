//! Build size report and on-disk size types.

use std::fmt;

use serde::{Serialize, Serializer};

/// Main bundle name used when no file of the requested type exists.
pub const BUNDLE_NOT_FOUND: &str = "Not found";

/// On-disk allocated size of a build directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskUsage {
    /// Block-allocated size in bytes.
    Bytes(u64),
    /// The host has no disk usage facility.
    Unsupported,
}

impl DiskUsage {
    /// Size in bytes, or `None` when unsupported.
    pub fn bytes(&self) -> Option<u64> {
        match self {
            Self::Bytes(bytes) => Some(*bytes),
            Self::Unsupported => None,
        }
    }
}

/// Prints the byte count, or `NaN` when unsupported.
impl fmt::Display for DiskUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => write!(f, "{bytes}"),
            Self::Unsupported => f.write_str("NaN"),
        }
    }
}

impl Serialize for DiskUsage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bytes(bytes) => serializer.serialize_u64(*bytes),
            Self::Unsupported => serializer.serialize_none(),
        }
    }
}

/// Snapshot of build-wide totals plus main bundle detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSizeReport {
    /// File name of the largest file of the bundle type, or [`BUNDLE_NOT_FOUND`].
    pub main_bundle_name: String,
    /// Logical size of the main bundle (0 if none).
    pub main_bundle_size: u64,
    /// Gzip-compressed size of the main bundle (0 if none).
    pub main_bundle_size_gzip: u64,
    /// Brotli-compressed size of the main bundle (0 if none).
    pub main_bundle_size_brotli: u64,
    /// Sum of all file sizes.
    pub build_size: u64,
    /// On-disk allocated size of the build directory.
    pub build_size_on_disk: DiskUsage,
    /// Number of regular files in the build directory.
    pub build_file_count: u64,
}

impl BuildSizeReport {
    /// Report field names in their fixed column order.
    pub const FIELD_NAMES: [&'static str; 7] = [
        "mainBundleName",
        "mainBundleSize",
        "mainBundleSizeGzip",
        "mainBundleSizeBrotli",
        "buildSize",
        "buildSizeOnDisk",
        "buildFileCount",
    ];

    /// Field values rendered as text, in [`Self::FIELD_NAMES`] order.
    pub fn field_values(&self) -> [String; 7] {
        [
            self.main_bundle_name.clone(),
            self.main_bundle_size.to_string(),
            self.main_bundle_size_gzip.to_string(),
            self.main_bundle_size_brotli.to_string(),
            self.build_size.to_string(),
            self.build_size_on_disk.to_string(),
            self.build_file_count.to_string(),
        ]
    }

    /// Check whether a main bundle was found.
    pub fn has_main_bundle(&self) -> bool {
        self.main_bundle_name != BUNDLE_NOT_FOUND
    }
}
