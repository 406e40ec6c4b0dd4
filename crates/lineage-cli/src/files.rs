//! Snapshot file selection under the data directory

use std::path::{Path, PathBuf};

/// Get default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".lineage")
}

/// Timestamped default save path, e.g. `lineage 2026-08-07 14.03.59.json`.
pub fn timestamped_snapshot_path(data_dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y-%m-%d %H.%M.%S");
    data_dir.join(format!("lineage {}.json", stamp))
}

/// Newest snapshot in the data directory.
///
/// Snapshot filenames embed their timestamp, so the lexicographic maximum
/// is the most recent one.
pub fn newest_snapshot(data_dir: &Path) -> Option<PathBuf> {
    let mut snapshots: Vec<PathBuf> = std::fs::read_dir(data_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "json"))
        .collect();
    snapshots.sort();
    snapshots.pop()
}
