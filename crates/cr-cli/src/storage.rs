//! Results file
//!
//! Solutions, mode scores, the daily schedule and player names are kept in a
//! JSON file between runs so boards survive the process that produced them.

use anyhow::Context;
use cr_store::{MemoryStore, StoreSnapshot};
use std::path::Path;

/// Read a snapshot; a missing file is an empty one
///
/// # Errors
/// Unreadable file or invalid JSON.
pub fn load_snapshot(path: &Path) -> anyhow::Result<StoreSnapshot> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no results file yet");
        return Ok(StoreSnapshot::default());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read results {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid results {}", path.display()))
}

/// Write `store`'s records to `path`
///
/// Writes a sibling temp file first and renames it over `path`, so an
/// interrupted save leaves the previous file intact.
///
/// # Errors
/// Serialization or filesystem failure.
pub fn save_snapshot(path: &Path, store: &MemoryStore) -> anyhow::Result<()> {
    let snapshot = store.snapshot();
    let text = serde_json::to_string_pretty(&snapshot).context("failed to encode results")?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, text)
        .with_context(|| format!("failed to write {}", staging.display()))?;
    std::fs::rename(&staging, path)
        .with_context(|| format!("failed to replace results {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        solutions = snapshot.solutions.len(),
        scores = snapshot.scores.len(),
        "results saved"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = load_snapshot(&dir.path().join("absent.json")).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load_snapshot(&path).unwrap_err();
        assert!(err.to_string().contains("invalid results"));
    }

    #[test]
    fn save_creates_parent_dirs_and_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("results.json");
        let store = MemoryStore::new();
        store.register_user(cr_store::UserId::new(), "ana");

        save_snapshot(&path, &store).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(load_snapshot(&path).unwrap().players[0].username, "ana");
    }
}
