//! Subcommand registry.
//!
//! One central table maps command names to factories; nothing registers
//! itself from other modules. Commands are constructed with a
//! [`CommandContext`] carrying the resolved connection parameters and run
//! with the verbatim passthrough arguments, reporting their status through
//! an integer exit code.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::DbConfig;
use crate::errors::Result;

pub mod config;

pub use self::config::ConfigCommand;

/// Everything a command needs at construction time.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Resolved connection parameters.
    pub db: DbConfig,
    /// Path of the configuration file in effect.
    pub config_file: PathBuf,
    /// Verbatim arguments following the command token.
    pub args: Vec<String>,
}

/// A dispatchable subcommand.
pub trait Command {
    /// Execute with the passthrough arguments; returns the process exit code.
    fn run(&mut self, args: &[String]) -> Result<i32>;
}

type CommandFactory = fn(&CommandContext) -> Box<dyn Command>;

/// Static name-to-factory table of the available commands.
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, CommandFactory>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let mut commands: BTreeMap<&'static str, CommandFactory> = BTreeMap::new();
        commands.insert("config", |ctx| Box::new(ConfigCommand::new(ctx)));

        Self { commands }
    }

    /// Look up a command factory by name.
    pub fn get(&self, name: &str) -> Option<&CommandFactory> {
        self.commands.get(name)
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    #[test]
    fn given_registered_name_when_looking_up_then_factory_is_found() {
        let registry = CommandRegistry::new();

        assert!(registry.get("config").is_some());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["config"]);
    }

    #[test]
    fn given_unregistered_name_when_looking_up_then_nothing_is_found() {
        let registry = CommandRegistry::new();

        assert!(registry.get("unify").is_none());
    }

    #[test]
    fn unknown_command_error_carries_the_name() {
        let err = Error::UnknownCommand("mistery".to_string());

        assert_eq!(err.to_string(), "Unknown command mistery");
    }
}
