//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::Parser;

use crate::config::DbOverrides;

/// Export identities from a Mozillians directory dump to the SortingHat
/// identities JSON format.
#[derive(Parser, Debug)]
#[command(name = "mozillians2sh")]
#[command(author, version, about, long_about = None)]
pub struct ExporterArgs {
    /// Source name tagged on every exported identity
    #[arg(short, long)]
    pub source: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub outfile: Option<PathBuf>,

    /// Input file (default: stdin)
    pub infile: Option<PathBuf>,
}

/// First-pass parser: extracts only the config file location, ignoring
/// everything else on the command line.
#[derive(Parser, Debug)]
#[command(ignore_errors = true)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct ConfigFileArgs {
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Manage identities in the SortingHat registry.
#[derive(Parser, Debug)]
#[command(name = "sortinghat")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Commands:\n  config    Get and set configuration parameters")]
pub struct DispatcherArgs {
    /// Configuration file (default: ~/.sortinghat)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Database user
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// Database password
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// Name of the database
    #[arg(short = 'd', long)]
    pub database: Option<String>,

    /// Database server host
    #[arg(long)]
    pub host: Option<String>,

    /// Database server port
    #[arg(long)]
    pub port: Option<u16>,

    /// Command to run
    pub command: String,

    /// Arguments passed through to the command, verbatim
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl DispatcherArgs {
    /// Connection-parameter flags as an override layer.
    pub fn overrides(&self) -> DbOverrides {
        DbOverrides {
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
            host: self.host.clone(),
            port: self.port,
        }
    }
}
