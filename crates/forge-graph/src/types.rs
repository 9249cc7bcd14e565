//! Closed type enumerations and the extension inference table
//!
//! File types are closed enumerations serialized as kebab-case strings in
//! the manifest. Extension→type inference is an [`ExtensionMap`] passed to
//! the reconciler at construction, never a global table, so tests and
//! embedders can substitute their own mappings.

use crate::path;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category of an authoring-time asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFileType {
    ModelMesh,
    Sculpt,
    Image,
    Audio,
    ScriptSource,
    Other,
}

/// Category of an engine-ready asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameFileType {
    Material,
    Texture,
    AudioEncoded,
    CompiledScript,
    BuildProject,
    Other,
}

/// Supported target games.
///
/// Serialized under the variant name as authored in manifests
/// (e.g. `"SkyrimSpecialEdition"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameName {
    Skyrim,
    SkyrimSpecialEdition,
    Fallout4,
}

/// Per-project feature toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    #[serde(default)]
    pub use_pyro: bool,
}

/// Immutable extension→type mapping used for create-event inference.
///
/// Lookup keys are lowercased extensions without the dot. An extension
/// absent from the map means the caller must be asked for an explicit type.
#[derive(Debug, Clone)]
pub struct ExtensionMap {
    source: HashMap<String, SourceFileType>,
    game: HashMap<String, GameFileType>,
}

impl ExtensionMap {
    /// An empty map that recognizes nothing.
    pub fn empty() -> Self {
        Self {
            source: HashMap::new(),
            game: HashMap::new(),
        }
    }

    /// Register a source-tree extension.
    pub fn with_source(mut self, extension: &str, file_type: SourceFileType) -> Self {
        self.source.insert(extension.to_lowercase(), file_type);
        self
    }

    /// Register a game-tree extension.
    pub fn with_game(mut self, extension: &str, file_type: GameFileType) -> Self {
        self.game.insert(extension.to_lowercase(), file_type);
        self
    }

    /// Infer the source file type from a path's extension.
    pub fn source_type(&self, path: &str) -> Option<SourceFileType> {
        let ext = path::extension(path)?.to_lowercase();
        self.source.get(&ext).copied()
    }

    /// Infer the game file type from a path's extension.
    pub fn game_type(&self, path: &str) -> Option<GameFileType> {
        let ext = path::extension(path)?.to_lowercase();
        self.game.get(&ext).copied()
    }
}

impl Default for ExtensionMap {
    /// The builtin table for the authoring formats this tool targets.
    fn default() -> Self {
        Self::empty()
            .with_source("fbx", SourceFileType::ModelMesh)
            .with_source("blend", SourceFileType::ModelMesh)
            .with_source("ztl", SourceFileType::Sculpt)
            .with_source("zpr", SourceFileType::Sculpt)
            .with_source("tiff", SourceFileType::Image)
            .with_source("tif", SourceFileType::Image)
            .with_source("png", SourceFileType::Image)
            .with_source("psd", SourceFileType::Image)
            .with_source("wav", SourceFileType::Audio)
            .with_source("psc", SourceFileType::ScriptSource)
            .with_game("bgsm", GameFileType::Material)
            .with_game("bgem", GameFileType::Material)
            .with_game("dds", GameFileType::Texture)
            .with_game("xwm", GameFileType::AudioEncoded)
            .with_game("fuz", GameFileType::AudioEncoded)
            .with_game("pex", GameFileType::CompiledScript)
            .with_game("ppj", GameFileType::BuildProject)
    }
}
