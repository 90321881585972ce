//! CLI layer: argument parsing and the runtime both binaries share.

use std::process;

use tracing_subscriber::EnvFilter;

use crate::exitcode;

pub mod args;

pub use args::{ConfigFileArgs, DispatcherArgs, ExporterArgs};

/// Initialize tracing with an env-filter (`RUST_LOG`), writing to stderr so
/// log lines never mix into stdout payloads.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// A break signal is not an error: report it and leave cleanly.
pub fn install_interrupt_handler() {
    let result = ctrlc::set_handler(|| {
        eprintln!("\nReceived Ctrl-C or other break signal. Exiting.");
        process::exit(exitcode::OK);
    });

    if let Err(e) = result {
        tracing::warn!("cannot install interrupt handler: {e}");
    }
}
