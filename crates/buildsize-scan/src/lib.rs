//! Build directory cataloguing for buildsize.
//!
//! This crate walks a build output directory and measures it:
//!
//! - **File catalog** via jwalk/rayon, one [`FileRecord`] per regular file
//! - **Type filter** selecting files by a case-insensitive `.<type>` suffix
//! - **Disk usage probes** for the block-allocated size of the tree
//!
//! # Example
//!
//! ```rust,no_run
//! use buildsize_scan::{FileCatalog, filter_by_type, largest};
//!
//! let records = FileCatalog::new().scan("/path/to/build".as_ref()).unwrap();
//! let scripts = filter_by_type(&records, "js");
//!
//! if let Some(main) = largest(scripts) {
//!     println!("Main bundle: {} ({} bytes)", main.name, main.size);
//! }
//! ```

mod catalog;
mod disk_usage;
mod filter;

pub use catalog::FileCatalog;
#[cfg(unix)]
pub use disk_usage::BlockCountProbe;
pub use disk_usage::{DiskUsageProbe, DuCommandProbe, UnsupportedProbe, default_probe};
pub use filter::{filter_by_type, largest};

// Re-export core types for convenience
pub use buildsize_core::{BuildSizeError, DiskUsage, FileRecord, Operation};
