//! Filesystem side of a generation run.
//! Generator-owned files are replaced in full on every run, developer-owned
//! files are written only when they do not exist yet.

use crate::error::{Error, Result};
use crate::planner::{Artifact, Ownership};
use log::debug;
use std::fmt;
use std::fs;
use std::path::Path;

/// What happened (or, in a dry run, would happen) to an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOutcome {
    /// The file did not exist and was written.
    Created,
    /// The file existed and was replaced.
    Overwritten,
    /// The file is developer-owned and already exists.
    Skipped,
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WriteOutcome::Created => "Created",
            WriteOutcome::Overwritten => "Overwritten",
            WriteOutcome::Skipped => "Skipped",
        };
        f.write_str(label)
    }
}

/// Applies the ownership rules of artifacts to the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct Writer {
    dry_run: bool,
}

fn exists(path: &Path) -> Result<bool> {
    path.try_exists()
        .map_err(|source| Error::ArtifactWrite { path: path.to_path_buf(), source })
}

impl Writer {
    pub fn new() -> Self {
        Self { dry_run: false }
    }

    /// A writer that reports outcomes without touching the filesystem.
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns `true` when the artifact must be left alone.
    ///
    /// Called before rendering so preserved handlers are never rendered.
    pub fn should_skip(&self, artifact: &Artifact) -> Result<bool> {
        Ok(artifact.kind.ownership() == Ownership::Developer && exists(&artifact.path)?)
    }

    /// Creates `dir` and all of its parents. Existing directories are fine.
    ///
    /// # Errors
    /// * `Error::DirectoryCreate` if a segment cannot be created
    pub fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }
        fs::create_dir_all(dir)
            .map_err(|source| Error::DirectoryCreate { path: dir.to_path_buf(), source })
    }

    /// Writes the rendered content of an artifact according to its ownership.
    ///
    /// # Returns
    /// * `Result<WriteOutcome>` - What was done with the file
    ///
    /// # Errors
    /// * `Error::DirectoryCreate` if the parent directory cannot be created
    /// * `Error::ArtifactWrite` if the file cannot be checked or written
    pub fn write(&self, artifact: &Artifact, content: &str) -> Result<WriteOutcome> {
        let path = &artifact.path;
        let existed = exists(path)?;

        if existed && artifact.kind.ownership() == Ownership::Developer {
            debug!("Keeping existing {} '{}'", artifact.kind, path.display());
            return Ok(WriteOutcome::Skipped);
        }

        if let Some(parent) = path.parent() {
            self.ensure_dir(parent)?;
        }

        if self.dry_run {
            debug!("Dry run, not writing '{}'", path.display());
        } else {
            debug!("Writing {} '{}'", artifact.kind, path.display());
            fs::write(path, content)
                .map_err(|source| Error::ArtifactWrite { path: path.to_path_buf(), source })?;
        }

        Ok(if existed { WriteOutcome::Overwritten } else { WriteOutcome::Created })
    }
}
