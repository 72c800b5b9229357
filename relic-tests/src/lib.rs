//! Helpers for loading the test fixtures.

use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The directory holding the fixtures.
pub static FIXTURES_PATH: Lazy<PathBuf> =
    Lazy::new(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures"));

/// Read a fixture, given its path relative to the fixtures directory.
pub fn load(path: &str) -> Vec<u8> {
    let path = FIXTURES_PATH.join(path);

    std::fs::read(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

/// Read a fixture holding little-endian 16-bit values.
pub fn load_u16(path: &str) -> Vec<u16> {
    load(path)
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect()
}

/// Read a fixture holding little-endian 32-bit floats.
pub fn load_f32(path: &str) -> Vec<f32> {
    load(path)
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// All files in a fixture directory, sorted by name.
pub fn files_in(dir: &str) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(FIXTURES_PATH.join(dir))
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();
    paths.sort();

    paths
}

/// The extension of a path, or an empty string.
pub fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or_default()
}
