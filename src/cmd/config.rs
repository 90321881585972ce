//! `config` subcommand: get and set connection parameters in the
//! configuration file.

use std::path::{Path, PathBuf};

use ini::Ini;

use crate::cmd::{Command, CommandContext};
use crate::errors::{Error, Result};
use crate::exitcode;

/// Keys that may be read or written, as `<section>.<option>` pairs.
const CONFIG_OPTIONS: &[&str] = &[
    "db.user",
    "db.password",
    "db.database",
    "db.host",
    "db.port",
];

pub struct ConfigCommand {
    config_file: PathBuf,
}

impl ConfigCommand {
    pub fn new(ctx: &CommandContext) -> Self {
        Self {
            config_file: ctx.config_file.clone(),
        }
    }

    /// Print `<key> <value>` for a supported key.
    pub fn get(&self, key: &str) -> Result<i32> {
        if !is_supported_key(key) {
            return Err(Error::Config(format!("{key} parameter does not exists")));
        }
        if !self.config_file.is_file() {
            return Err(Error::Config(format!(
                "{} config file does not exist",
                self.config_file.display()
            )));
        }

        let conf = load(&self.config_file)?;
        let (section, option) = split_key(key);
        if let Some(value) = conf.get_from(Some(section), option) {
            println!("{key} {value}");
        }

        Ok(exitcode::OK)
    }

    /// Write a supported key, keeping the rest of the file intact. The file
    /// is created when it does not exist yet.
    pub fn set(&self, key: &str, value: &str) -> Result<i32> {
        if !is_supported_key(key) {
            return Err(Error::Config(format!(
                "{key} parameter does not exists or cannot be set"
            )));
        }

        let mut conf = if self.config_file.is_file() {
            load(&self.config_file)?
        } else {
            Ini::new()
        };

        let (section, option) = split_key(key);
        conf.with_section(Some(section)).set(option, value);
        conf.write_to_file(&self.config_file).map_err(|e| Error::Write {
            path: self.config_file.display().to_string(),
            source: e,
        })?;

        Ok(exitcode::OK)
    }
}

impl Command for ConfigCommand {
    fn run(&mut self, args: &[String]) -> Result<i32> {
        match args {
            [action, key] if action == "get" => self.get(key),
            [action, key, value] if action == "set" => self.set(key, value),
            _ => Err(Error::InvalidArgs(
                "usage: config get <key> | config set <key> <value>".to_string(),
            )),
        }
    }
}

fn is_supported_key(key: &str) -> bool {
    CONFIG_OPTIONS.contains(&key)
}

fn split_key(key: &str) -> (&str, &str) {
    // Callers check is_supported_key first, so the dot is always present.
    key.split_once('.').unwrap_or(("", key))
}

fn load(path: &Path) -> Result<Ini> {
    Ini::load_from_file(path)
        .map_err(|e| Error::Config(format!("invalid config file {}: {}", path.display(), e)))
}
