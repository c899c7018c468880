//! Catalogued file records.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A regular file found under the build directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File name (not full path).
    pub name: CompactString,

    /// Absolute path to the file.
    pub path: PathBuf,

    /// Logical size in bytes.
    pub size: u64,
}

impl FileRecord {
    /// Create a new file record.
    pub fn new(name: impl Into<CompactString>, path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size,
        }
    }

    /// Check whether the file name ends with `.<file_type>`, ignoring case.
    ///
    /// A leading dot on `file_type` is accepted, so `"js"` and `".js"` match
    /// the same names.
    pub fn has_type(&self, file_type: &str) -> bool {
        let file_type = file_type.trim_start_matches('.');
        let name = self.name.as_bytes();
        let suffix_len = file_type.len() + 1;
        if name.len() < suffix_len {
            return false;
        }
        let suffix = &name[name.len() - suffix_len..];
        suffix[0] == b'.' && suffix[1..].eq_ignore_ascii_case(file_type.as_bytes())
    }
}
