//! Tracked file entities
//!
//! Both entity kinds share the same identity rules: the id is assigned once
//! and never changes; the path may change through renames. Path uniqueness
//! within a collection is always decided by comparing paths, never ids.

use crate::types::{GameFileType, SourceFileType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Common surface of graph-tracked files, used by the fuzzy matcher and by
/// generic lookup code.
pub trait TrackedFile {
    /// Stable identifier, immutable for the entity's lifetime.
    fn id(&self) -> Uuid;
    /// Tracked path as authored.
    fn path(&self) -> &str;
}

/// An authoring-time asset (mesh, sculpt, texture source, audio, script).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub id: Uuid,
    pub path: String,
    pub file_type: SourceFileType,
    /// Ids of the game files this source file produces. The manifest field
    /// name is historical; it has always held game file ids, not paths.
    #[serde(rename = "destinationPaths", default)]
    pub game_file_links: BTreeSet<Uuid>,
}

impl SourceFile {
    pub(crate) fn new(path: String, file_type: SourceFileType) -> Self {
        Self {
            id: Uuid::new_v4(),
            path,
            file_type,
            game_file_links: BTreeSet::new(),
        }
    }
}

impl TrackedFile for SourceFile {
    fn id(&self) -> Uuid {
        self.id
    }

    fn path(&self) -> &str {
        &self.path
    }
}

/// An engine-ready asset produced by the build pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFile {
    pub id: Uuid,
    pub path: String,
    pub file_type: GameFileType,
}

impl GameFile {
    pub(crate) fn new(path: String, file_type: GameFileType) -> Self {
        Self {
            id: Uuid::new_v4(),
            path,
            file_type,
        }
    }
}

impl TrackedFile for GameFile {
    fn id(&self) -> Uuid {
        self.id
    }

    fn path(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_file_serializes_links_under_historical_name() {
        let mut file = SourceFile::new("models/sword.fbx".into(), SourceFileType::ModelMesh);
        file.game_file_links.insert(Uuid::nil());

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["fileType"], "model-mesh");
        assert_eq!(
            json["destinationPaths"][0],
            "00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn nil_uuid_round_trips() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "path": "sounds/roar.wav",
            "fileType": "audio",
            "destinationPaths": []
        }"#;
        let file: SourceFile = serde_json::from_str(json).unwrap();
        assert!(file.id.is_nil());
        let back: SourceFile =
            serde_json::from_str(&serde_json::to_string(&file).unwrap()).unwrap();
        assert_eq!(back, file);
    }
}
