//! Skeleton rendering for fsmctl.
//! Every artifact kind has one fixed skeleton under `src/templates`. The
//! skeletons are compiled once when the renderer is built, so a broken
//! skeleton fails the run before any file is written.
use crate::error::{Error, Result};
use crate::planner::{ArtifactKind, RenderContext};
use minijinja::{Environment, UndefinedBehavior};

/// The built-in skeleton of every artifact kind.
pub const SKELETONS: [(ArtifactKind, &str); 4] = [
    (ArtifactKind::Controller, include_str!("templates/controller.go.j2")),
    (ArtifactKind::Handler, include_str!("templates/handler.go.j2")),
    (ArtifactKind::BeforeHook, include_str!("templates/before.go.j2")),
    (ArtifactKind::AfterHook, include_str!("templates/after.go.j2")),
];

/// Trait for skeleton rendering engines.
pub trait TemplateRenderer {
    /// Renders the skeleton of `kind` with the given context.
    ///
    /// # Arguments
    /// * `kind` - Which skeleton to expand
    /// * `context` - Data computed by the planner
    ///
    /// # Returns
    /// * `Result<String>` - Complete file content
    fn render(&self, kind: ArtifactKind, context: &RenderContext) -> Result<String>;
}

/// MiniJinja-based rendering engine.
pub struct MiniJinjaRenderer {
    /// Environment holding the compiled skeletons
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with the built-in skeletons.
    ///
    /// # Errors
    /// * `Error::TemplateRender` if a skeleton does not compile
    pub fn new() -> Result<Self> {
        Self::with_skeletons(&SKELETONS)
    }

    /// Creates a renderer from explicit skeleton sources.
    pub fn with_skeletons(skeletons: &[(ArtifactKind, &'static str)]) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        for &(kind, source) in skeletons {
            env.add_template(kind.template_name(), source).map_err(|err| {
                Error::TemplateRender { template: kind.template_name().to_string(), source: err }
            })?;
        }

        Ok(Self { env })
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a skeleton using MiniJinja.
    ///
    /// # Errors
    /// * `Error::TemplateRender` if:
    ///   - No skeleton is registered for `kind`
    ///   - Rendering fails
    fn render(&self, kind: ArtifactKind, context: &RenderContext) -> Result<String> {
        let name = kind.template_name();
        let into_error = |source: minijinja::Error| Error::TemplateRender { template: name.to_string(), source };

        let tmpl = self.env.get_template(name).map_err(into_error)?;
        tmpl.render(context).map_err(into_error)
    }
}
