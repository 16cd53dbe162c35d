//! Subcommands of the fsmctl binary.
//! A [`Registry`] is built once by the entry point and owns every command;
//! it produces the clap definition of the command line and routes a parsed
//! subcommand to its implementation.

use crate::error::{Error, Result};
use clap::ArgMatches;
use indexmap::IndexMap;

pub mod state;

/// A feature reachable from the command line.
pub trait Command {
    /// Subcommand name, e.g. `state`.
    fn name(&self) -> &'static str;

    /// One line description shown in the help output.
    fn about(&self) -> &'static str;

    /// clap definition of the subcommand and its arguments.
    fn args(&self) -> clap::Command;

    /// Runs the command with the matches of its own subcommand.
    fn execute(&self, matches: &ArgMatches) -> Result<()>;
}

/// Table of available commands, keyed by name in registration order.
#[derive(Default)]
pub struct Registry {
    commands: IndexMap<&'static str, Box<dyn Command>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in command.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(state::StateCommand));
        registry
    }

    /// Adds a command, replacing any command registered under the same name.
    pub fn register(&mut self, command: Box<dyn Command>) -> &mut Self {
        self.commands.insert(command.name(), command);
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|command| command.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    /// Adds every registered command to `root` as a subcommand.
    pub fn augment(&self, root: clap::Command) -> clap::Command {
        root.subcommands(
            self.commands.values().map(|command| command.args().about(command.about())),
        )
    }

    /// Runs the command called `name`.
    ///
    /// # Errors
    /// * `Error::UnknownCommand` if no command has that name
    /// * Any error returned by the command
    pub fn dispatch(&self, name: &str, matches: &ArgMatches) -> Result<()> {
        let command = self.get(name).ok_or_else(|| Error::UnknownCommand(name.to_string()))?;
        command.execute(matches)
    }

    /// Runs the subcommand selected in top-level matches.
    pub fn run(&self, matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some((name, sub_matches)) => self.dispatch(name, sub_matches),
            None => Err(Error::MissingCommand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, ArgAction};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Echo {
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl Command for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn about(&self) -> &'static str {
            "Records its argument"
        }

        fn args(&self) -> clap::Command {
            clap::Command::new(self.name())
                .arg(Arg::new("word").required(true).action(ArgAction::Set))
        }

        fn execute(&self, matches: &ArgMatches) -> Result<()> {
            let word = matches.get_one::<String>("word").cloned().unwrap_or_default();
            self.seen.borrow_mut().push(word);
            Ok(())
        }
    }

    fn registry_with_echo() -> (Registry, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = Registry::new();
        registry.register(Box::new(Echo { seen: Rc::clone(&seen) }));
        (registry, seen)
    }

    #[test]
    fn test_dispatch_routes_by_name() {
        let (registry, seen) = registry_with_echo();
        let cli = registry.augment(clap::Command::new("fsmctl"));
        let matches = cli.try_get_matches_from(["fsmctl", "echo", "hello"]).unwrap();

        registry.run(&matches).unwrap();
        assert_eq!(*seen.borrow(), vec!["hello".to_string()]);
    }

    #[test]
    fn test_unknown_command() {
        let (registry, _) = registry_with_echo();
        let err = registry.dispatch("codec", &ArgMatches::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownCommand(name) if name == "codec"));
    }

    #[test]
    fn test_missing_command() {
        let (registry, _) = registry_with_echo();
        let matches = clap::Command::new("fsmctl").try_get_matches_from(["fsmctl"]).unwrap();
        assert!(matches!(registry.run(&matches), Err(Error::MissingCommand)));
    }

    #[test]
    fn test_registries_are_independent() {
        let (registry, _) = registry_with_echo();
        let empty = Registry::new();

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["echo"]);
        assert_eq!(empty.names().count(), 0);
        assert!(empty.get("echo").is_none());
    }

    #[test]
    fn test_defaults_contain_state() {
        let registry = Registry::with_defaults();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["state"]);

        let cli = registry.augment(clap::Command::new("fsmctl"));
        assert!(cli.find_subcommand("state").is_some());
    }
}
