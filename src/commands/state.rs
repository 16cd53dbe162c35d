//! The `state` command: generates state machine scaffolding for a game.

use crate::commands::Command;
use crate::config::load_config;
use crate::error::Result;
use crate::generator::{Generator, Report};
use crate::planner::{Layout, DEFAULT_IMPORT_ROOT};
use crate::renderer::MiniJinjaRenderer;
use crate::writer::Writer;
use clap::{ArgMatches, Args, FromArgMatches};
use log::debug;
use std::path::PathBuf;

/// Default directory holding state machine configurations.
pub const DEFAULT_CONFIG_DIR: &str = "./rpc/server/internal/room_game/state/json";

/// Default root of the generated code.
pub const DEFAULT_OUTPUT_DIR: &str = "./rpc/server/internal/room_game";

/// Arguments of the `state` command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct StateArgs {
    /// Directory holding the state machine configurations
    #[arg(short = 'j', long, value_name = "DIR", default_value = DEFAULT_CONFIG_DIR)]
    pub json_dir: PathBuf,

    /// Configuration file name inside the configuration directory
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: String,

    /// Directory where the state machine code is generated
    #[arg(short = 'o', long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Import path of the output directory inside the consuming module
    #[arg(long, value_name = "PATH", default_value = DEFAULT_IMPORT_ROOT)]
    pub import_root: String,

    /// Show what would be generated without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl StateArgs {
    pub fn config_path(&self) -> PathBuf {
        self.json_dir.join(&self.file)
    }
}

/// Loads the configuration named by `args` and generates its code.
///
/// # Errors
/// Any loader, renderer or writer error.
pub fn generate(args: &StateArgs) -> Result<Report> {
    let config = load_config(args.config_path())?;
    let layout = Layout::new(&args.output).with_import_root(args.import_root.as_str());
    let renderer = MiniJinjaRenderer::new()?;
    let writer = if args.dry_run { Writer::dry_run() } else { Writer::new() };

    debug!("Generating game '{}' into {}", config.game_key, args.output.display());
    Generator::new(&renderer, writer).generate(&config, &layout)
}

/// Generates the controller and handler stubs of a game state machine.
pub struct StateCommand;

impl Command for StateCommand {
    fn name(&self) -> &'static str {
        "state"
    }

    fn about(&self) -> &'static str {
        "Generate state machine scaffolding from a game configuration"
    }

    fn args(&self) -> clap::Command {
        StateArgs::augment_args(clap::Command::new(self.name()))
    }

    fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let args = StateArgs::from_arg_matches(matches)?;
        let report = generate(&args)?;

        for entry in &report.entries {
            println!("{}: '{}'", entry.outcome, entry.path.display());
        }
        if args.dry_run {
            println!("Dry run completed, nothing was written to {}.", args.output.display());
        } else {
            println!("State machine code generated successfully in {}.", args.output.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> std::result::Result<StateArgs, clap::Error> {
        let matches = StateCommand.args().try_get_matches_from(argv)?;
        StateArgs::from_arg_matches(&matches)
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["state", "-f", "dice.json"]).unwrap();
        assert_eq!(args.json_dir, PathBuf::from(DEFAULT_CONFIG_DIR));
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(args.import_root, DEFAULT_IMPORT_ROOT);
        assert!(!args.dry_run);
        assert_eq!(args.config_path(), PathBuf::from(DEFAULT_CONFIG_DIR).join("dice.json"));
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&[
            "state",
            "-j",
            "configs",
            "--file",
            "dice.yaml",
            "-o",
            "out",
            "--import-root",
            "example.com/app",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(args.config_path(), PathBuf::from("configs/dice.yaml"));
        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.import_root, "example.com/app");
        assert!(args.dry_run);
    }

    #[test]
    fn test_file_is_required() {
        assert!(parse(&["state", "-o", "out"]).is_err());
    }
}
