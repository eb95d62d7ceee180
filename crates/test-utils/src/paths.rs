//! Path utilities for locating test data files.

use std::path::{Path, PathBuf};

/// Returns the workspace root directory.
///
/// Walks up from this crate's manifest directory (`crates/test-utils`).
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Searches for a test file in multiple locations.
///
/// This function checks the following locations in order:
/// 1. Environment variable `TEST_DATA_DIR` (if set)
/// 2. `testdata/` at the workspace root
/// 3. The workspace root itself, where the export normally lives
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(test_data_dir) = std::env::var("TEST_DATA_DIR") {
        candidates.push(PathBuf::from(test_data_dir).join(name));
    }

    let root = workspace_root();
    candidates.extend([root.join("testdata").join(name), root.join(name)]);

    candidates.into_iter().find(|path| path.exists())
}

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("site_ingest_")
        .tempdir()
        .expect("Failed to create temporary test directory")
}

/// Write `content` to `dir/name` and return the path.
pub fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write test source file");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_is_valid() {
        let root = workspace_root();
        assert!(
            root.join("Cargo.toml").exists(),
            "Workspace root should contain Cargo.toml: {:?}",
            root
        );
    }

    #[test]
    fn test_temp_test_dir() {
        let dir = temp_test_dir();
        assert!(dir.path().exists());
        assert!(dir.path().to_string_lossy().contains("site_ingest_"));
    }

    #[test]
    fn test_write_source() {
        let dir = temp_test_dir();
        let path = write_source(dir.path(), "sites.csv", "a,b\n");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "a,b\n");
    }
}
