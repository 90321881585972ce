//! Integration tests for the `config` subcommand.

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use sortinghat::cmd::{Command, CommandContext, ConfigCommand};
use sortinghat::config::DbConfig;
use sortinghat::errors::Error;
use sortinghat::exitcode;

const MOCK_CONFIG: &str = "[db]\nuser = root\npassword = ****\ndatabase = testdb\n";

fn command_for(config_file: &Path) -> ConfigCommand {
    let ctx = CommandContext {
        db: DbConfig::default(),
        config_file: config_file.to_path_buf(),
        args: Vec::new(),
    };
    ConfigCommand::new(&ctx)
}

#[fixture]
fn mock_config() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mock_config_file.cfg");
    fs::write(&path, MOCK_CONFIG).unwrap();
    (dir, path)
}

#[rstest]
fn given_supported_key_when_setting_then_other_values_are_kept(mock_config: (TempDir, PathBuf)) {
    let (_dir, path) = mock_config;
    let cmd = command_for(&path);

    assert_eq!(cmd.set("db.user", "jsmith").unwrap(), exitcode::OK);
    assert_eq!(cmd.set("db.database", "mydb").unwrap(), exitcode::OK);

    let conf = Ini::load_from_file(&path).unwrap();
    assert_eq!(conf.get_from(Some("db"), "user"), Some("jsmith"));
    assert_eq!(conf.get_from(Some("db"), "password"), Some("****"));
    assert_eq!(conf.get_from(Some("db"), "database"), Some("mydb"));
}

#[rstest]
fn given_missing_file_when_setting_then_file_is_created(mock_config: (TempDir, PathBuf)) {
    let (dir, _) = mock_config;
    let path = dir.path().join("fresh.cfg");
    let cmd = command_for(&path);

    assert_eq!(cmd.set("db.host", "db.example.com").unwrap(), exitcode::OK);

    let conf = Ini::load_from_file(&path).unwrap();
    assert_eq!(conf.get_from(Some("db"), "host"), Some("db.example.com"));
}

#[rstest]
#[case("section.option")]
#[case("1")]
#[case(".")]
#[case("section.")]
#[case(".option")]
#[case("section.option.suboption")]
fn given_unsupported_key_when_setting_then_reports_error(
    mock_config: (TempDir, PathBuf),
    #[case] key: &str,
) {
    let (_dir, path) = mock_config;
    let cmd = command_for(&path);

    match cmd.set(key, "value") {
        Err(Error::Config(message)) => {
            assert_eq!(
                message,
                format!("{key} parameter does not exists or cannot be set")
            )
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[rstest]
#[case("section.option")]
#[case("1")]
#[case(".")]
#[case("section.")]
#[case(".option")]
#[case("section.option.suboption")]
fn given_unsupported_key_when_getting_then_reports_error(
    mock_config: (TempDir, PathBuf),
    #[case] key: &str,
) {
    let (_dir, path) = mock_config;
    let cmd = command_for(&path);

    match cmd.get(key) {
        Err(Error::Config(message)) => {
            assert_eq!(message, format!("{key} parameter does not exists"))
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[rstest]
fn given_supported_keys_when_getting_then_succeeds(mock_config: (TempDir, PathBuf)) {
    let (_dir, path) = mock_config;
    let cmd = command_for(&path);

    assert_eq!(cmd.get("db.user").unwrap(), exitcode::OK);
    assert_eq!(cmd.get("db.password").unwrap(), exitcode::OK);
    assert_eq!(cmd.get("db.database").unwrap(), exitcode::OK);
}

#[test]
fn given_missing_file_when_getting_then_reports_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("invalid_config_file.cfg");
    let cmd = command_for(&path);

    match cmd.get("db.user") {
        Err(Error::Config(message)) => {
            assert_eq!(
                message,
                format!("{} config file does not exist", path.display())
            )
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[rstest]
fn given_run_entry_point_when_dispatching_then_actions_are_routed(
    mock_config: (TempDir, PathBuf),
) {
    let (_dir, path) = mock_config;
    let mut cmd = command_for(&path);

    let args: Vec<String> = vec!["set".into(), "db.user".into(), "jroe".into()];
    assert_eq!(cmd.run(&args).unwrap(), exitcode::OK);

    let args: Vec<String> = vec!["get".into(), "db.user".into()];
    assert_eq!(cmd.run(&args).unwrap(), exitcode::OK);

    let args: Vec<String> = vec!["drop".into(), "db.user".into()];
    assert!(matches!(cmd.run(&args), Err(Error::InvalidArgs(_))));
}
