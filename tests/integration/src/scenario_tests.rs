//! End-to-end scenarios over the graph and the persisted manifest

use forge_graph::{
    GameFileType, GameName, Project, ProjectSettings, SourceFileType, similarity_score,
};
use forge_store::{ManifestStore, SCHEMA_URL};
use forge_test_utils::temp_store;
use pretty_assertions::assert_eq;
use uuid::Uuid;

/// Initialize, add, link, remove the game file by path: the source file
/// survives with an empty link set and the game file is gone — across a
/// save/load cycle.
#[test]
fn add_link_remove_round_trip() {
    let (_dir, store) = temp_store();

    let mut project = Project::new(
        "com.example.test",
        "Example",
        GameName::SkyrimSpecialEdition,
        "C:\\Games\\Skyrim",
    );
    let source = project
        .add_source_file("models/sword.fbx", SourceFileType::ModelMesh)
        .unwrap();
    let game = project
        .add_game_file("textures/sword.dds", GameFileType::Texture)
        .unwrap();
    project.link_source_to_game(source.id, game.id).unwrap();
    store.save(&project).unwrap();

    let mut project = store.load_required().unwrap();
    let removed = project
        .remove_game_file_by_path("textures/sword.dds")
        .unwrap();
    assert_eq!(removed.id, game.id);
    store.save(&project).unwrap();

    let reloaded = store.load_required().unwrap();
    assert!(reloaded.game_files().is_empty());
    let survivor = reloaded.source_file_by_path("models/sword.fbx").unwrap();
    assert_eq!(survivor.id, source.id);
    assert!(survivor.game_file_links.is_empty());
}

/// Adding `A/B.TIFF` after `a/b.tiff` is a duplicate; the graph keeps
/// exactly one source file.
#[test]
fn duplicate_path_rejection_scenario() {
    let mut project = Project::new(
        "com.example.test",
        "Example",
        GameName::SkyrimSpecialEdition,
        "C:\\Games\\Skyrim",
    );
    project.add_source_file("a/b.tiff", SourceFileType::Image).unwrap();

    let err = project
        .add_source_file("A/B.TIFF", SourceFileType::Image)
        .unwrap_err();
    assert!(matches!(err, forge_graph::Error::DuplicatePath { .. }));
    assert_eq!(project.source_files().len(), 1);
}

/// The manifest on disk has the documented shape, and a full project —
/// settings, links, empty link lists — survives serialization exactly.
#[test]
fn manifest_shape_and_round_trip() {
    let (_dir, store) = temp_store();

    let mut project = Project::new(
        "com.example.riften",
        "Riften",
        GameName::SkyrimSpecialEdition,
        "C:/Games/Skyrim",
    )
    .with_settings(ProjectSettings { use_pyro: true });
    let source = project
        .add_source_file("models/sword.fbx", SourceFileType::ModelMesh)
        .unwrap();
    project
        .add_source_file("sounds/roar.wav", SourceFileType::Audio)
        .unwrap();
    let game = project
        .add_game_file("textures/sword.dds", GameFileType::Texture)
        .unwrap();
    project.link_source_to_game(source.id, game.id).unwrap();
    store.save(&project).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["$schema"], SCHEMA_URL);
    assert_eq!(value["id"], "com.example.riften");
    assert_eq!(value["namespace"], "Riften");
    assert_eq!(value["game"]["name"], "SkyrimSpecialEdition");
    assert_eq!(value["game"]["path"], "C:/Games/Skyrim");
    assert_eq!(value["projectSettings"]["usePyro"], true);
    assert_eq!(
        value["sourceFiles"][0]["destinationPaths"][0],
        game.id.to_string()
    );
    assert_eq!(value["sourceFiles"][1]["destinationPaths"], serde_json::json!([]));
    assert!(Uuid::parse_str(value["gameFiles"][0]["id"].as_str().unwrap()).is_ok());

    assert_eq!(store.load_required().unwrap(), project);
}

/// A project without settings serializes `projectSettings` as null and
/// round-trips.
#[test]
fn absent_settings_round_trip_as_null() {
    let (_dir, store) = temp_store();
    let project = Project::new(
        "com.example.test",
        "Example",
        GameName::Fallout4,
        "C:/Games/Fallout4",
    );
    store.save(&project).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert!(value["projectSettings"].is_null());
    assert_eq!(store.load_required().unwrap(), project);
}

/// Fuzzy suggestions work end to end over a populated project.
#[test]
fn fuzzy_suggestions_rank_candidates() {
    let mut project = Project::new(
        "com.example.test",
        "Example",
        GameName::SkyrimSpecialEdition,
        "C:/Games/Skyrim",
    );
    project
        .add_source_file("models/ironsword.fbx", SourceFileType::ModelMesh)
        .unwrap();
    project
        .add_source_file("models/ironsord.fbx", SourceFileType::ModelMesh)
        .unwrap();
    project
        .add_source_file("sounds/dragon.wav", SourceFileType::Audio)
        .unwrap();

    let matches = project.find_similar_source_files("meshes/ironsword.nif");
    let paths: Vec<&str> = matches.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["models/ironsword.fbx", "models/ironsord.fbx"]);

    // Both pass the threshold; the exact boundary is pinned in unit tests.
    assert!(similarity_score("ironsword", "ironsord") >= 70);
}
