//! Connection configuration with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Environment variables: `SORTINGHAT_DB_*`
//! 3. Config file: `~/.sortinghat`, `[db]` section
//! 4. Explicit command-line flags

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::BaseDirs;
use ini::Ini;
use tracing::debug;

use crate::errors::{Error, Result};

pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;

/// Prefix of the environment-variable layer (`SORTINGHAT_DB_USER`, ...).
pub const ENV_PREFIX: &str = "SORTINGHAT_DB";

/// Name of the dotfile looked up in the user's home directory.
pub const CONFIG_FILE_NAME: &str = ".sortinghat";

const DB_SECTION: &str = "db";

/// Resolved connection parameters handed to subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub user: String,
    pub password: String,
    pub database: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            database: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// One layer of overrides; `None` keeps the value of the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbOverrides {
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl DbConfig {
    /// Resolve the effective configuration from the three override layers,
    /// applied in precedence order.
    pub fn resolve(env: &DbOverrides, file: &DbOverrides, flags: &DbOverrides) -> Self {
        let resolved = Self::default()
            .merge_with(env)
            .merge_with(file)
            .merge_with(flags);

        debug!(
            user = %resolved.user,
            database = ?resolved.database,
            host = %resolved.host,
            port = resolved.port,
            "resolved connection parameters"
        );

        resolved
    }

    /// Overlay wins if set, otherwise keep the current value.
    fn merge_with(&self, overlay: &DbOverrides) -> Self {
        Self {
            user: overlay.user.clone().unwrap_or_else(|| self.user.clone()),
            password: overlay
                .password
                .clone()
                .unwrap_or_else(|| self.password.clone()),
            database: overlay.database.clone().or_else(|| self.database.clone()),
            host: overlay.host.clone().unwrap_or_else(|| self.host.clone()),
            port: overlay.port.unwrap_or(self.port),
        }
    }
}

/// Read the `SORTINGHAT_DB_*` environment layer.
pub fn env_overrides() -> Result<DbOverrides> {
    let env = Config::builder()
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .build()
        .map_err(|e| Error::Config(e.to_string()))?;

    let mut overrides = DbOverrides::default();
    if let Ok(value) = env.get_string("user") {
        overrides.user = Some(value);
    }
    if let Ok(value) = env.get_string("password") {
        overrides.password = Some(value);
    }
    if let Ok(value) = env.get_string("database") {
        overrides.database = Some(value);
    }
    if let Ok(value) = env.get_string("host") {
        overrides.host = Some(value);
    }
    if let Ok(value) = env.get_string("port") {
        overrides.port = Some(parse_port(&value)?);
    }

    Ok(overrides)
}

/// Read the `[db]` section of an INI config file.
///
/// A missing file yields an empty layer; a file without a `[db]` section
/// contributes nothing.
pub fn file_overrides(path: &Path) -> Result<DbOverrides> {
    if !path.is_file() {
        debug!(path = %path.display(), "no config file");
        return Ok(DbOverrides::default());
    }

    let conf = Ini::load_from_file(path)
        .map_err(|e| Error::Config(format!("invalid config file {}: {}", path.display(), e)))?;

    let mut overrides = DbOverrides::default();
    if let Some(section) = conf.section(Some(DB_SECTION)) {
        overrides.user = section.get("user").map(str::to_owned);
        overrides.password = section.get("password").map(str::to_owned);
        overrides.database = section.get("database").map(str::to_owned);
        overrides.host = section.get("host").map(str::to_owned);
        overrides.port = match section.get("port") {
            Some(port) => Some(parse_port(port)?),
            None => None,
        };
    }

    Ok(overrides)
}

fn parse_port(value: &str) -> Result<u16> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("invalid port number: {value}")))
}

/// Default config file location: `~/.sortinghat`.
pub fn default_config_path() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(format!("~/{CONFIG_FILE_NAME}")))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user-supplied config path.
pub fn expand_config_path(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string());
    PathBuf::from(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_overrides_when_merging_then_keeps_defaults() {
        let resolved = DbConfig::default().merge_with(&DbOverrides::default());

        assert_eq!(resolved.user, "root");
        assert_eq!(resolved.password, "");
        assert_eq!(resolved.database, None);
        assert_eq!(resolved.host, "localhost");
        assert_eq!(resolved.port, 3306);
    }

    #[test]
    fn given_overlay_when_merging_then_set_fields_win() {
        let overlay = DbOverrides {
            user: Some("alice".to_string()),
            database: Some("mydb".to_string()),
            ..Default::default()
        };

        let resolved = DbConfig::default().merge_with(&overlay);

        assert_eq!(resolved.user, "alice");
        assert_eq!(resolved.database, Some("mydb".to_string()));
        // Untouched fields come from the layer below
        assert_eq!(resolved.password, "");
        assert_eq!(resolved.host, "localhost");
        assert_eq!(resolved.port, 3306);
    }

    #[test]
    fn given_stacked_overlays_when_merging_then_later_layer_wins() {
        let file = DbOverrides {
            user: Some("file_user".to_string()),
            host: Some("db.example.com".to_string()),
            ..Default::default()
        };
        let flags = DbOverrides {
            user: Some("flag_user".to_string()),
            ..Default::default()
        };

        let resolved = DbConfig::default().merge_with(&file).merge_with(&flags);

        assert_eq!(resolved.user, "flag_user");
        assert_eq!(resolved.host, "db.example.com");
    }

    #[test]
    fn given_invalid_port_when_parsing_then_reports_config_error() {
        let result = parse_port("not-a-port");

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn given_default_path_then_points_at_home_dotfile() {
        let path = default_config_path();

        assert!(path.to_string_lossy().ends_with(CONFIG_FILE_NAME));
    }
}
