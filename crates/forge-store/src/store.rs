//! Manifest load/save with atomic writes
//!
//! The manifest is the single source of truth for a project; the in-memory
//! graph is rebuilt from it at startup. Writes go to a temp file in the
//! same directory under an advisory lock and are renamed into place, so a
//! crash never leaves a truncated manifest behind.

use crate::error::{Error, Result};
use forge_graph::Project;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Schema URL written into every saved manifest.
pub const SCHEMA_URL: &str = "https://asset-forge.dev/schemas/project-v1.json";

/// Serialized manifest shape: the `$schema` marker followed by the project
/// fields. Unknown schema values are accepted on load and rewritten on the
/// next save.
#[derive(Serialize)]
struct ManifestOut<'a> {
    #[serde(rename = "$schema")]
    schema: &'static str,
    #[serde(flatten)]
    project: &'a Project,
}

#[derive(Deserialize)]
struct ManifestIn {
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,
    #[serde(flatten)]
    project: Project,
}

/// Persistence handle for one project manifest file.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the manifest, if one exists.
    ///
    /// A missing file and a malformed manifest both return `Ok(None)`: a
    /// corrupted manifest must not crash the tool, it should let the caller
    /// offer re-initialization. Malformed content is logged.
    pub fn load(&self) -> Result<Option<Project>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Error::io(&self.path, err)),
        };
        match serde_json::from_str::<ManifestIn>(&content) {
            Ok(manifest) => Ok(Some(manifest.project)),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "manifest is malformed, treating as absent"
                );
                Ok(None)
            }
        }
    }

    /// Load the manifest, failing with [`Error::ProjectNotFound`] if absent
    /// or malformed.
    pub fn load_required(&self) -> Result<Project> {
        self.load()?.ok_or_else(|| Error::ProjectNotFound {
            path: self.path.clone(),
        })
    }

    /// Save the project atomically.
    ///
    /// Serializes with two-space indentation for human review, writes to a
    /// temp file in the same directory (same filesystem, so the rename is
    /// atomic) under an exclusive advisory lock, then renames over the
    /// manifest path.
    pub fn save(&self, project: &Project) -> Result<()> {
        let manifest = ManifestOut {
            schema: SCHEMA_URL,
            project,
        };
        let mut content = serde_json::to_string_pretty(&manifest)?;
        content.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
        }

        let temp_name = format!(
            ".{}.{}.tmp",
            self.path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default(),
            std::process::id()
        );
        let temp_path = self.path.with_file_name(&temp_name);

        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| Error::io(&temp_path, e))?;

        temp_file
            .lock_exclusive()
            .map_err(|_| Error::LockFailed {
                path: self.path.clone(),
            })?;

        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| Error::io(&temp_path, e))?;
        temp_file
            .sync_all()
            .map_err(|e| Error::io(&temp_path, e))?;

        fs::rename(&temp_path, &self.path).map_err(|e| Error::io(&self.path, e))?;

        Ok(())
    }
}
