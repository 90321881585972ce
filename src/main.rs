use std::env;
use std::process;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::debug;

use sortinghat::cli::{self, ConfigFileArgs, DispatcherArgs};
use sortinghat::cmd::{CommandContext, CommandRegistry};
use sortinghat::config::{self, DbConfig};
use sortinghat::errors::{Error, Result};
use sortinghat::exitcode;

fn main() {
    cli::setup_logging();
    cli::install_interrupt_handler();

    // No arguments at all is a usage error, not a success path.
    if env::args().len() <= 1 {
        DispatcherArgs::command().print_help().ok();
        process::exit(exitcode::ERROR);
    }

    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            process::exit(exitcode::ERROR);
        }
    }
}

fn run() -> Result<i32> {
    // First pass: only the config file location; every other argument is
    // left for the full parser.
    let first_pass = ConfigFileArgs::parse();
    let config_file = first_pass
        .config
        .as_deref()
        .map(config::expand_config_path)
        .unwrap_or_else(config::default_config_path);
    let file_layer = config::file_overrides(&config_file)?;

    let args = DispatcherArgs::parse();
    let env_layer = config::env_overrides()?;
    let db = DbConfig::resolve(&env_layer, &file_layer, &args.overrides());

    let registry = CommandRegistry::new();
    let factory = registry
        .get(&args.command)
        .ok_or_else(|| Error::UnknownCommand(args.command.clone()))?;

    debug!(command = %args.command, "dispatching");

    let ctx = CommandContext {
        db,
        config_file,
        args: args.args,
    };
    let mut command = factory(&ctx);
    command.run(&ctx.args)
}
