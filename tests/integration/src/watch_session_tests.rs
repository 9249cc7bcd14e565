//! Live watch-session smoke tests
//!
//! These drive the real notify backend over temp directories. Assertions
//! poll the persisted manifest because event delivery latency varies by
//! platform.

use forge_graph::{ExtensionMap, GameName, Project, SourceFileType};
use forge_store::ManifestStore;
use forge_test_utils::ScriptedPrompt;
use forge_watch::{WatchRoots, WatchSession};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::tempdir;

const SETTLE: Duration = Duration::from_millis(200);
const DEADLINE: Duration = Duration::from_secs(10);

fn wait_for<F: Fn(&ManifestStore) -> bool>(store: &ManifestStore, predicate: F) {
    let deadline = Instant::now() + DEADLINE;
    while Instant::now() < deadline {
        if predicate(store) {
            return;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    panic!("condition not reached before deadline");
}

fn session_fixture(
    source_root: &Path,
    game_root: Option<&Path>,
) -> (ManifestStore, WatchSession) {
    let project = Project::new(
        "com.example.live",
        "Live",
        GameName::SkyrimSpecialEdition,
        "C:/Games/Skyrim",
    );
    let store = ManifestStore::new(source_root.join("project.json"));
    store.save(&project).unwrap();

    let roots = WatchRoots {
        source: Some(source_root.join("src")),
        game: game_root.map(Path::to_path_buf),
    };
    fs::create_dir_all(source_root.join("src")).unwrap();

    let session = WatchSession::start(
        project,
        store.clone(),
        ExtensionMap::default(),
        roots,
        ScriptedPrompt::accepting(),
    )
    .unwrap();
    std::thread::sleep(SETTLE);
    (store, session)
}

#[test]
fn created_file_lands_in_the_manifest() {
    let dir = tempdir().unwrap();
    let (store, session) = session_fixture(dir.path(), None);

    fs::write(dir.path().join("src/sword.fbx"), b"mesh").unwrap();

    wait_for(&store, |store| {
        store
            .load()
            .unwrap()
            .map(|p| p.source_file_by_path("sword.fbx").is_some())
            .unwrap_or(false)
    });

    let project = session.stop().unwrap();
    let tracked = project.source_file_by_path("sword.fbx").unwrap();
    assert_eq!(tracked.file_type, SourceFileType::ModelMesh);
}

#[test]
fn deleted_file_leaves_the_manifest() {
    let dir = tempdir().unwrap();
    let (store, session) = session_fixture(dir.path(), None);

    let file = dir.path().join("src/roar.wav");
    fs::write(&file, b"audio").unwrap();
    wait_for(&store, |store| {
        store
            .load()
            .unwrap()
            .map(|p| p.source_file_by_path("roar.wav").is_some())
            .unwrap_or(false)
    });

    fs::remove_file(&file).unwrap();
    wait_for(&store, |store| {
        store
            .load()
            .unwrap()
            .map(|p| p.source_file_by_path("roar.wav").is_none())
            .unwrap_or(false)
    });

    session.stop().unwrap();
}

#[test]
fn both_trees_feed_one_session() {
    let dir = tempdir().unwrap();
    let game_dir = tempdir().unwrap();
    let (store, session) = session_fixture(dir.path(), Some(game_dir.path()));

    fs::write(dir.path().join("src/sword.fbx"), b"mesh").unwrap();
    fs::write(game_dir.path().join("sword.dds"), b"texture").unwrap();

    wait_for(&store, |store| {
        store
            .load()
            .unwrap()
            .map(|p| {
                p.source_file_by_path("sword.fbx").is_some()
                    && p.game_file_by_path("sword.dds").is_some()
            })
            .unwrap_or(false)
    });

    let project = session.stop().unwrap();
    assert_eq!(project.source_files().len(), 1);
    assert_eq!(project.game_files().len(), 1);
}

#[test]
fn stop_ends_event_delivery() {
    let dir = tempdir().unwrap();
    let (store, session) = session_fixture(dir.path(), None);

    let project = session.stop().unwrap();
    assert!(project.source_files().is_empty());

    // Changes after stop never reach the manifest.
    fs::write(dir.path().join("src/late.fbx"), b"mesh").unwrap();
    std::thread::sleep(Duration::from_millis(400));
    let persisted = store.load().unwrap().unwrap();
    assert!(persisted.source_file_by_path("late.fbx").is_none());
}
