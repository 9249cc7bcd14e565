//! Temp-dir project fixtures

use forge_graph::{GameName, Project};
use forge_store::ManifestStore;
use tempfile::TempDir;

/// A minimal valid project targeting Skyrim SE.
pub fn test_project() -> Project {
    Project::new(
        "com.example.test",
        "Example",
        GameName::SkyrimSpecialEdition,
        "C:/Games/Skyrim",
    )
}

/// A manifest store rooted in a fresh temp directory.
///
/// Keep the returned [`TempDir`] alive for the duration of the test.
pub fn temp_store() -> (TempDir, ManifestStore) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = ManifestStore::new(dir.path().join("project.json"));
    (dir, store)
}
