//! Error handling for fsmctl.
//! Defines the error type and result alias used throughout the generator.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a configuration or generating code.
///
/// Every variant names the path or operation that failed, so a single
/// line on stderr is enough to diagnose a failed run.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("Failed to read configuration '{path}': {source}.")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration content does not decode into the expected shape,
    /// or it describes handlers whose generated names would collide.
    #[error("Failed to parse configuration '{path}': {reason}.")]
    ConfigParse { path: PathBuf, reason: String },

    /// A directory of the output tree could not be created.
    #[error("Failed to create directory '{path}': {source}.")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A skeleton failed to compile or render.
    #[error("Failed to render template '{template}': {source}.")]
    TemplateRender {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    /// A generated file could not be written.
    #[error("Failed to write '{path}': {source}.")]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No subcommand was given on the command line.
    #[error("No command given.")]
    MissingCommand,

    /// The dispatcher was asked for a command it does not know.
    #[error("Unknown command '{0}'.")]
    UnknownCommand(String),

    /// Arguments of a subcommand could not be parsed.
    #[error("Invalid arguments: {0}")]
    Cli(#[from] clap::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
