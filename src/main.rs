//! fsmctl's main application entry point.
//! Builds the command registry, parses arguments and dispatches to the
//! selected command.

use fsmctl::{
    cli::get_matches, commands::Registry, error::default_error_handler, logger::init_logger,
};

/// Main application entry point.
fn main() {
    let registry = Registry::with_defaults();
    let matches = get_matches(&registry);

    init_logger(matches.get_flag("verbose"));

    if let Err(err) = registry.run(&matches) {
        default_error_handler(err);
    }
}
