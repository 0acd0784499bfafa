//! Locating bundled test data and scratch files.

use std::path::{Path, PathBuf};

/// Workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Directories searched for test data, in priority order: `TEST_DATA_DIR`,
/// the CLI's bundled `testdata/`, then a workspace-level `testdata/`.
pub fn testdata_dirs() -> Vec<PathBuf> {
    let root = workspace_root();
    std::env::var_os("TEST_DATA_DIR")
        .map(PathBuf::from)
        .into_iter()
        .chain([
            root.join("services").join("scene-cli").join("testdata"),
            root.join("testdata"),
        ])
        .collect()
}

/// First existing file called `name` in [`testdata_dirs`].
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    testdata_dirs()
        .into_iter()
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}

/// Scratch directory removed when dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_test_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
    path
}
