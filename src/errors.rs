//! Crate-wide error type.
//!
//! Two classes of failures reach the user: reported errors, printed as
//! `Error: <message>` with exit status 1, and interactive interrupts, which
//! are handled by the binaries and never surface here.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Input stream does not follow the expected source format.
    #[error("{0}")]
    InvalidFormat(String),

    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Configuration loading, parsing or lookup failure.
    #[error("{0}")]
    Config(String),

    #[error("Unknown command {0}")]
    UnknownCommand(String),

    /// Bad arguments for a subcommand.
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
