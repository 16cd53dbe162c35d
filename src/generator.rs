//! Generation run orchestration.
//! Plans the artifacts of a game, renders each one and hands it to the
//! writer. The run stops at the first error; files written before it stay
//! on disk.

use crate::config::GameConfig;
use crate::error::Result;
use crate::planner::{plan, ArtifactKind, Layout};
use crate::renderer::TemplateRenderer;
use crate::writer::{WriteOutcome, Writer};
use log::debug;
use std::path::PathBuf;

/// Outcome of one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub path: PathBuf,
    pub kind: ArtifactKind,
    pub outcome: WriteOutcome,
}

/// Everything a run did, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn count(&self, outcome: WriteOutcome) -> usize {
        self.entries.iter().filter(|e| e.outcome == outcome).count()
    }

    pub fn count_kind(&self, kind: ArtifactKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

/// Drives plan, render and write for a game configuration.
pub struct Generator<'a> {
    renderer: &'a dyn TemplateRenderer,
    writer: Writer,
}

impl<'a> Generator<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer, writer: Writer) -> Self {
        Self { renderer, writer }
    }

    /// Generates every artifact of `config` under `layout`.
    ///
    /// # Flow
    /// 1. Plans all artifacts
    /// 2. Creates the handler directory
    /// 3. For each artifact: skips preserved handlers, renders, writes
    ///
    /// # Errors
    /// Returns the first render or filesystem error.
    pub fn generate(&self, config: &GameConfig, layout: &Layout) -> Result<Report> {
        let artifacts = plan(config, layout);
        self.writer.ensure_dir(&layout.handler_dir(&config.game_key))?;

        let mut report = Report::default();
        for artifact in artifacts {
            let outcome = if self.writer.should_skip(&artifact)? {
                debug!("Skipping existing {} '{}'", artifact.kind, artifact.path.display());
                WriteOutcome::Skipped
            } else {
                let content = self.renderer.render(artifact.kind, &artifact.context)?;
                self.writer.write(&artifact, &content)?
            };

            report.entries.push(ReportEntry { path: artifact.path, kind: artifact.kind, outcome });
        }

        Ok(report)
    }
}
