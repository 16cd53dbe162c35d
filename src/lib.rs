//! fsmctl generates state machine scaffolding for game servers.
//! It reads a game configuration describing states, events and transitions
//! and writes a controller plus one handler stub per (state, event) pair,
//! without ever overwriting a handler a developer has already edited.

/// Command-line interface module for the fsmctl binary
pub mod cli;

/// Subcommands and the registry that dispatches them
pub mod commands;

/// Game configuration loading and validation
/// Supports JSON and YAML documents
pub mod config;

/// Error types and handling for fsmctl
pub mod error;

/// Generation run orchestration
pub mod generator;

pub mod logger;

/// Identifier derivation shared by every generated unit
pub mod naming;

/// Mapping of a configuration to the files a run produces
pub mod planner;

/// Skeleton rendering
pub mod renderer;

/// Filesystem writes with per-artifact ownership rules
pub mod writer;
