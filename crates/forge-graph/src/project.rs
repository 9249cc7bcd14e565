//! The project graph: tracked files, links, and invariant-preserving mutations
//!
//! All mutation methods are all-or-nothing per call. The graph assumes a
//! single writer per call; during a watch session the reconciler owns the
//! project exclusively, and manual commands reload the persisted manifest
//! before mutating. Callers that share a project across threads guard the
//! whole value with one mutex.

use crate::error::{Error, Result};
use crate::file::{GameFile, SourceFile, TrackedFile};
use crate::matcher;
use crate::path;
use crate::types::{GameFileType, GameName, ProjectSettings, SourceFileType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The target game and its install path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTarget {
    pub name: GameName,
    pub path: String,
}

/// One tracked modding project: identity, target game, and the two file
/// collections with the links between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub namespace: String,
    pub game: GameTarget,
    #[serde(rename = "projectSettings", default)]
    pub settings: Option<ProjectSettings>,
    #[serde(default)]
    source_files: Vec<SourceFile>,
    #[serde(default)]
    game_files: Vec<GameFile>,
}

impl Project {
    /// Create a new project. Identity, namespace, game, and game path are
    /// required; settings are optional.
    pub fn new(
        id: impl Into<String>,
        namespace: impl Into<String>,
        game_name: GameName,
        game_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            namespace: namespace.into(),
            game: GameTarget {
                name: game_name,
                path: path::normalize(game_path.into()),
            },
            settings: None,
            source_files: Vec::new(),
            game_files: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: ProjectSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    // ---- queries ----------------------------------------------------------

    pub fn source_files(&self) -> &[SourceFile] {
        &self.source_files
    }

    pub fn game_files(&self) -> &[GameFile] {
        &self.game_files
    }

    pub fn source_file_by_id(&self, id: Uuid) -> Option<&SourceFile> {
        self.source_files.iter().find(|f| f.id == id)
    }

    pub fn game_file_by_id(&self, id: Uuid) -> Option<&GameFile> {
        self.game_files.iter().find(|f| f.id == id)
    }

    /// Look up a source file by path, case-insensitively.
    pub fn source_file_by_path(&self, file_path: &str) -> Option<&SourceFile> {
        self.source_files
            .iter()
            .find(|f| path::eq_ignore_case(&f.path, file_path))
    }

    /// Look up a game file by path, case-insensitively.
    pub fn game_file_by_path(&self, file_path: &str) -> Option<&GameFile> {
        self.game_files
            .iter()
            .find(|f| path::eq_ignore_case(&f.path, file_path))
    }

    /// All source files that link to the given game file.
    pub fn sources_linked_to(&self, game_id: Uuid) -> Vec<&SourceFile> {
        self.source_files
            .iter()
            .filter(|f| f.game_file_links.contains(&game_id))
            .collect()
    }

    /// Source files whose names are similar to `candidate`, best match first.
    pub fn find_similar_source_files(&self, candidate: &str) -> Vec<&SourceFile> {
        matcher::rank_similar(candidate, &self.source_files)
    }

    /// Game files whose names are similar to `candidate`, best match first.
    pub fn find_similar_game_files(&self, candidate: &str) -> Vec<&GameFile> {
        matcher::rank_similar(candidate, &self.game_files)
    }

    // ---- mutations --------------------------------------------------------

    /// Track a new source file. Fails with [`Error::DuplicatePath`] if the
    /// path is already tracked (case-insensitive); the graph is unchanged on
    /// failure.
    pub fn add_source_file(
        &mut self,
        file_path: impl Into<String>,
        file_type: SourceFileType,
    ) -> Result<SourceFile> {
        let file_path = path::normalize(file_path.into());
        if self.source_file_by_path(&file_path).is_some() {
            return Err(Error::DuplicatePath { path: file_path });
        }
        let file = SourceFile::new(file_path, file_type);
        self.source_files.push(file.clone());
        Ok(file)
    }

    /// Track a new game file. Same duplicate-path rule as
    /// [`Project::add_source_file`], against the game collection.
    pub fn add_game_file(
        &mut self,
        file_path: impl Into<String>,
        file_type: GameFileType,
    ) -> Result<GameFile> {
        let file_path = path::normalize(file_path.into());
        if self.game_file_by_path(&file_path).is_some() {
            return Err(Error::DuplicatePath { path: file_path });
        }
        let file = GameFile::new(file_path, file_type);
        self.game_files.push(file.clone());
        Ok(file)
    }

    /// Record that `source_id` produces `game_id`. Inserting an existing
    /// link is a no-op, not an error.
    pub fn link_source_to_game(&mut self, source_id: Uuid, game_id: Uuid) -> Result<()> {
        if self.game_file_by_id(game_id).is_none() {
            return Err(Error::GameFileNotFound {
                key: game_id.to_string(),
            });
        }
        let source = self
            .source_files
            .iter_mut()
            .find(|f| f.id == source_id)
            .ok_or_else(|| Error::SourceFileNotFound {
                key: source_id.to_string(),
            })?;
        source.game_file_links.insert(game_id);
        Ok(())
    }

    /// Untrack a source file by id. Game files are untouched.
    pub fn remove_source_file_by_id(&mut self, id: Uuid) -> Result<SourceFile> {
        let pos = self
            .source_files
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| Error::SourceFileNotFound { key: id.to_string() })?;
        Ok(self.source_files.remove(pos))
    }

    /// Untrack a source file by path (case-insensitive).
    pub fn remove_source_file_by_path(&mut self, file_path: &str) -> Result<SourceFile> {
        let pos = self
            .source_files
            .iter()
            .position(|f| path::eq_ignore_case(&f.path, file_path))
            .ok_or_else(|| Error::SourceFileNotFound {
                key: file_path.to_string(),
            })?;
        Ok(self.source_files.remove(pos))
    }

    /// Untrack a game file by id and cascade-delete every link to it.
    ///
    /// The removal and the cascade are one step under the caller's lock:
    /// no reader can observe the game file gone while a source file still
    /// links to it.
    pub fn remove_game_file_by_id(&mut self, id: Uuid) -> Result<GameFile> {
        let pos = self
            .game_files
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| Error::GameFileNotFound { key: id.to_string() })?;
        let removed = self.game_files.remove(pos);
        self.cascade_unlink(removed.id);
        Ok(removed)
    }

    /// Untrack a game file by path (case-insensitive), with the same cascade
    /// as [`Project::remove_game_file_by_id`].
    pub fn remove_game_file_by_path(&mut self, file_path: &str) -> Result<GameFile> {
        let pos = self
            .game_files
            .iter()
            .position(|f| path::eq_ignore_case(&f.path, file_path))
            .ok_or_else(|| Error::GameFileNotFound {
                key: file_path.to_string(),
            })?;
        let removed = self.game_files.remove(pos);
        self.cascade_unlink(removed.id);
        Ok(removed)
    }

    /// Update a source file's path in place. The id is the anchor of
    /// correspondence and never changes.
    pub fn rename_source_file(&mut self, old_path: &str, new_path: &str) -> Result<()> {
        let new_path = path::normalize(new_path);
        if let Some(existing) = self.source_file_by_path(&new_path) {
            if !path::eq_ignore_case(&existing.path, old_path) {
                return Err(Error::DuplicatePath { path: new_path });
            }
        }
        let file = self
            .source_files
            .iter_mut()
            .find(|f| path::eq_ignore_case(&f.path, old_path))
            .ok_or_else(|| Error::SourceFileNotFound {
                key: old_path.to_string(),
            })?;
        file.path = new_path;
        Ok(())
    }

    /// Update a game file's path in place, id unchanged.
    pub fn rename_game_file(&mut self, old_path: &str, new_path: &str) -> Result<()> {
        let new_path = path::normalize(new_path);
        if let Some(existing) = self.game_file_by_path(&new_path) {
            if !path::eq_ignore_case(&existing.path, old_path) {
                return Err(Error::DuplicatePath { path: new_path });
            }
        }
        let file = self
            .game_files
            .iter_mut()
            .find(|f| path::eq_ignore_case(&f.path, old_path))
            .ok_or_else(|| Error::GameFileNotFound {
                key: old_path.to_string(),
            })?;
        file.path = new_path;
        Ok(())
    }

    /// Drop `game_id` from every source file's link set.
    ///
    /// This is the documented cascade step of the game-file removal
    /// operations, not a side effect; it runs inside the same `&mut self`
    /// call as the removal itself.
    fn cascade_unlink(&mut self, game_id: Uuid) {
        for source in &mut self.source_files {
            source.game_file_links.remove(&game_id);
        }
    }
}
