//! Package manifest version lookup.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// Manifest file read from the project directory.
pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    version: Option<String>,
}

/// Read the `version` field of `package.json` in `dir`.
///
/// A missing file, malformed JSON or absent field yields `None` with a
/// warning; none of these are errors.
pub async fn read_version(dir: &Path) -> Option<String> {
    let path = dir.join(MANIFEST_FILE);

    let contents = match tokio::fs::read_to_string(&path).await {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read package version");
            return None;
        }
    };

    let manifest: PackageManifest = match serde_json::from_str(&contents) {
        Ok(manifest) => manifest,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not parse package manifest");
            return None;
        }
    };

    match manifest.version {
        Some(version) if !version.trim().is_empty() => Some(version.trim().to_string()),
        _ => {
            warn!(path = %path.display(), "package manifest has no version");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_version() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(MANIFEST_FILE),
            r#"{"name": "app", "version": "1.4.2", "private": true}"#,
        )
        .unwrap();

        assert_eq!(read_version(temp.path()).await.as_deref(), Some("1.4.2"));
    }

    #[tokio::test]
    async fn test_missing_manifest() {
        let temp = TempDir::new().unwrap();
        assert_eq!(read_version(temp.path()).await, None);
    }

    #[tokio::test]
    async fn test_malformed_manifest() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(MANIFEST_FILE), "{ not json").unwrap();
        assert_eq!(read_version(temp.path()).await, None);
    }

    #[tokio::test]
    async fn test_manifest_without_version() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(MANIFEST_FILE), r#"{"name": "app"}"#).unwrap();
        assert_eq!(read_version(temp.path()).await, None);
    }
}
