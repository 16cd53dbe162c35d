//! Artifact planning.
//! Turns a [`GameConfig`] into the complete list of files a run produces,
//! together with the data each skeleton needs. Planning is pure: it never
//! touches the filesystem and cannot fail.

use crate::config::GameConfig;
use crate::naming::{
    controller_file_stem, derive_name, game_type_name, handler_file_stem, handler_identity,
    handler_module,
};
use log::debug;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Extension of every generated source file.
pub const SOURCE_EXTENSION: &str = "go";

/// Import root of the consuming application, used when the caller does
/// not provide one.
pub const DEFAULT_IMPORT_ROOT: &str = "slp/rpc/server/internal/room_game";

/// Who owns a generated file after it has been written once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Replaced in full on every run.
    Generator,
    /// Written only when absent.
    Developer,
}

/// The kinds of files a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Controller,
    Handler,
    BeforeHook,
    AfterHook,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Controller,
        ArtifactKind::Handler,
        ArtifactKind::BeforeHook,
        ArtifactKind::AfterHook,
    ];

    pub fn ownership(self) -> Ownership {
        match self {
            ArtifactKind::Handler => Ownership::Developer,
            ArtifactKind::Controller | ArtifactKind::BeforeHook | ArtifactKind::AfterHook => {
                Ownership::Generator
            }
        }
    }

    /// Name of the skeleton used to render this kind.
    pub fn template_name(self) -> &'static str {
        match self {
            ArtifactKind::Controller => "controller.go.j2",
            ArtifactKind::Handler => "handler.go.j2",
            ArtifactKind::BeforeHook => "before.go.j2",
            ArtifactKind::AfterHook => "after.go.j2",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Controller => "controller",
            ArtifactKind::Handler => "handler",
            ArtifactKind::BeforeHook => "before hook",
            ArtifactKind::AfterHook => "after hook",
        };
        f.write_str(name)
    }
}

/// Where generated files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    output_root: PathBuf,
    import_root: String,
}

impl Layout {
    pub fn new<P: Into<PathBuf>>(output_root: P) -> Self {
        Self { output_root: output_root.into(), import_root: DEFAULT_IMPORT_ROOT.to_string() }
    }

    /// Sets the import root the controller uses to reach the handler module.
    pub fn with_import_root<S: Into<String>>(mut self, import_root: S) -> Self {
        self.import_root = import_root.into().trim_end_matches('/').to_string();
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn import_root(&self) -> &str {
        &self.import_root
    }

    /// Directory holding the controller and the handler module.
    pub fn internal_dir(&self) -> PathBuf {
        self.output_root.join("state").join("internal")
    }

    pub fn controller_path(&self, game_key: &str) -> PathBuf {
        self.internal_dir()
            .join(format!("{}.{SOURCE_EXTENSION}", controller_file_stem(game_key)))
    }

    pub fn handler_dir(&self, game_key: &str) -> PathBuf {
        self.internal_dir().join(handler_module(game_key))
    }

    /// Import path of the handler module as seen from the controller.
    pub fn handler_import(&self, game_key: &str) -> String {
        format!("{}/state/internal/{}", self.import_root, handler_module(game_key))
    }
}

/// One outgoing edge in the controller's transition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionEntry {
    pub event: String,
    pub to: String,
    /// Handler identity the entry points at.
    pub handler: String,
}

/// One row of the controller's transition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateEntry {
    pub name: String,
    pub transitions: Vec<TransitionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerContext {
    pub game_key: String,
    pub game_name: String,
    pub game_type: String,
    pub handler_module: String,
    pub handler_import: String,
    pub initial_state: Option<String>,
    pub has_before: bool,
    pub has_after: bool,
    /// Whether any transition references the handler module.
    pub has_handlers: bool,
    pub states: Vec<StateEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerContext {
    pub handler_module: String,
    pub handler: String,
    /// Raw state name as written in the configuration.
    pub state: String,
    /// Raw event name as written in the configuration.
    pub event: String,
    pub state_name: String,
    pub event_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookContext {
    pub handler_module: String,
    pub game_type: String,
}

/// Data handed to the skeleton of an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RenderContext {
    Controller(ControllerContext),
    Handler(HandlerContext),
    Hook(HookContext),
}

/// A file the run will produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub kind: ArtifactKind,
    pub context: RenderContext,
}

/// Computes every artifact of a game.
///
/// The controller always comes first, followed by the enabled hooks and
/// then the handlers in declaration order.
pub fn plan(config: &GameConfig, layout: &Layout) -> Vec<Artifact> {
    let game_type = game_type_name(&config.game_key);
    let module = handler_module(&config.game_key);
    let handler_dir = layout.handler_dir(&config.game_key);

    let mut artifacts = vec![plan_controller(config, layout, &game_type, &module)];

    let hooks = [
        (config.has_before_hook, ArtifactKind::BeforeHook, "before"),
        (config.has_after_hook, ArtifactKind::AfterHook, "after"),
    ];
    for (enabled, kind, stem) in hooks {
        if enabled {
            artifacts.push(Artifact {
                path: handler_dir.join(format!("{stem}.{SOURCE_EXTENSION}")),
                kind,
                context: RenderContext::Hook(HookContext {
                    handler_module: module.clone(),
                    game_type: game_type.clone(),
                }),
            });
        }
    }

    for (state, transition) in config.transitions() {
        let handler = handler_identity(&game_type, state, &transition.event);
        artifacts.push(Artifact {
            path: handler_dir.join(format!("{}.{SOURCE_EXTENSION}", handler_file_stem(&handler))),
            kind: ArtifactKind::Handler,
            context: RenderContext::Handler(HandlerContext {
                handler_module: module.clone(),
                handler,
                state: state.to_string(),
                event: transition.event.clone(),
                state_name: derive_name(state),
                event_name: derive_name(&transition.event),
            }),
        });
    }

    debug!("Planned {} artifacts for game '{}'", artifacts.len(), config.game_key);
    artifacts
}

fn plan_controller(config: &GameConfig, layout: &Layout, game_type: &str, module: &str) -> Artifact {
    let states: Vec<StateEntry> = config
        .states
        .iter()
        .map(|(state, transitions)| StateEntry {
            name: state.clone(),
            transitions: transitions
                .iter()
                .map(|t| TransitionEntry {
                    event: t.event.clone(),
                    to: t.to.clone(),
                    handler: handler_identity(game_type, state, &t.event),
                })
                .collect(),
        })
        .collect();

    Artifact {
        path: layout.controller_path(&config.game_key),
        kind: ArtifactKind::Controller,
        context: RenderContext::Controller(ControllerContext {
            game_key: config.game_key.clone(),
            game_name: config.game_name.clone(),
            game_type: game_type.to_string(),
            handler_module: module.to_string(),
            handler_import: layout.handler_import(&config.game_key),
            initial_state: config.initial_state().map(str::to_string),
            has_before: config.has_before_hook,
            has_after: config.has_after_hook,
            has_handlers: states.iter().any(|s| !s.transitions.is_empty()),
            states,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StateTransition;

    fn idle_running(before: bool, after: bool) -> GameConfig {
        let mut config = GameConfig {
            game_key: "Dice".to_string(),
            game_name: "Dice".to_string(),
            has_before_hook: before,
            has_after_hook: after,
            ..Default::default()
        };
        config.states.insert("idle".to_string(), vec![StateTransition::new("start", "running")]);
        config.states.insert("running".to_string(), vec![StateTransition::new("stop", "idle")]);
        config
    }

    fn count(artifacts: &[Artifact], kind: ArtifactKind) -> usize {
        artifacts.iter().filter(|a| a.kind == kind).count()
    }

    #[test]
    fn test_plan_is_complete() {
        let artifacts = plan(&idle_running(false, false), &Layout::new("out"));
        assert_eq!(artifacts.len(), 3);
        assert_eq!(count(&artifacts, ArtifactKind::Controller), 1);
        assert_eq!(count(&artifacts, ArtifactKind::Handler), 2);
        assert_eq!(count(&artifacts, ArtifactKind::BeforeHook), 0);
        assert_eq!(count(&artifacts, ArtifactKind::AfterHook), 0);
    }

    #[test]
    fn test_hooks_are_gated_by_flags() {
        let artifacts = plan(&idle_running(true, false), &Layout::new("out"));
        assert_eq!(count(&artifacts, ArtifactKind::BeforeHook), 1);
        assert_eq!(count(&artifacts, ArtifactKind::AfterHook), 0);

        let artifacts = plan(&idle_running(true, true), &Layout::new("out"));
        assert_eq!(count(&artifacts, ArtifactKind::BeforeHook), 1);
        assert_eq!(count(&artifacts, ArtifactKind::AfterHook), 1);
    }

    #[test]
    fn test_paths() {
        let artifacts = plan(&idle_running(true, true), &Layout::new("out"));
        let paths: Vec<PathBuf> = artifacts.iter().map(|a| a.path.clone()).collect();
        let internal = Path::new("out").join("state").join("internal");

        assert_eq!(paths[0], internal.join("dice_game.go"));
        assert!(paths.contains(&internal.join("dice_handler").join("before.go")));
        assert!(paths.contains(&internal.join("dice_handler").join("after.go")));
        assert!(paths.contains(&internal.join("dice_handler").join("dicegameidlestart.go")));
        assert!(paths.contains(&internal.join("dice_handler").join("dicegamerunningstop.go")));
    }

    #[test]
    fn test_controller_context() {
        let artifacts = plan(&idle_running(false, true), &Layout::new("out").with_import_root("app/"));
        let RenderContext::Controller(ctx) = &artifacts[0].context else {
            panic!("Expected controller context first");
        };

        assert_eq!(ctx.game_type, "DiceGame");
        assert_eq!(ctx.handler_module, "dice_handler");
        assert_eq!(ctx.handler_import, "app/state/internal/dice_handler");
        assert_eq!(ctx.initial_state.as_deref(), Some("idle"));
        assert!(!ctx.has_before);
        assert!(ctx.has_after);
        assert_eq!(ctx.states[1].name, "running");
        assert_eq!(
            ctx.states[1].transitions[0],
            TransitionEntry {
                event: "stop".to_string(),
                to: "idle".to_string(),
                handler: "DiceGameRunningStopHandler".to_string(),
            }
        );
    }

    #[test]
    fn test_handler_context_names_match_controller_table() {
        let artifacts = plan(&idle_running(false, false), &Layout::new("out"));
        let RenderContext::Controller(controller) = &artifacts[0].context else {
            panic!("Expected controller context first");
        };
        let referenced: Vec<&str> = controller
            .states
            .iter()
            .flat_map(|s| s.transitions.iter().map(|t| t.handler.as_str()))
            .collect();

        for artifact in artifacts.iter().filter(|a| a.kind == ArtifactKind::Handler) {
            let RenderContext::Handler(ctx) = &artifact.context else {
                panic!("Expected handler context");
            };
            assert!(referenced.contains(&ctx.handler.as_str()));
        }
    }

    #[test]
    fn test_empty_machine() {
        let config = GameConfig { game_key: "empty".to_string(), ..Default::default() };
        let artifacts = plan(&config, &Layout::new("out"));
        assert_eq!(artifacts.len(), 1);
        let RenderContext::Controller(ctx) = &artifacts[0].context else {
            panic!("Expected controller context");
        };
        assert_eq!(ctx.initial_state, None);
        assert!(!ctx.has_handlers);
        assert!(ctx.states.is_empty());
    }

    #[test]
    fn test_ownership() {
        assert_eq!(ArtifactKind::Handler.ownership(), Ownership::Developer);
        for kind in [ArtifactKind::Controller, ArtifactKind::BeforeHook, ArtifactKind::AfterHook] {
            assert_eq!(kind.ownership(), Ownership::Generator);
        }
    }
}
