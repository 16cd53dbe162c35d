//! Command-line interface implementation for fsmctl.
//! Provides the top-level argument definition and help handling using clap.

use crate::commands::Registry;
use clap::{error::ErrorKind, ArgMatches, CommandFactory, Parser};

/// Top-level arguments shared by every command.
#[derive(Parser, Debug)]
#[command(
    name = "fsmctl",
    author,
    version,
    about = "fsmctl: state machine scaffolding generator for game servers",
    long_about = None
)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Builds the full command line: top-level flags plus every registered command.
pub fn build_cli(registry: &Registry) -> clap::Command {
    registry.augment(Args::command()).subcommand_required(true)
}

/// Parses the process arguments against the registry.
///
/// # Exits
/// * With status code 1 and the help text if no command is given
/// * With clap's default error handling for other argument errors
pub fn get_matches(registry: &Registry) -> ArgMatches {
    let mut cli = build_cli(registry);
    match cli.try_get_matches_from_mut(std::env::args_os()) {
        Ok(matches) => matches,
        Err(e) => {
            if e.kind() == ErrorKind::MissingSubcommand {
                let _ = cli
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
