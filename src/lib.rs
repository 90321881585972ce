//! SortingHat command-line tooling: a Mozillians directory exporter and the
//! `sortinghat` command dispatcher.
//!
//! The crate ships two binaries built on the same library:
//!
//! - `mozillians2sh` reads a Mozillians community-directory export, parses
//!   it with [`parsing::MozilliansParser`] and serializes the result into
//!   the SortingHat identities JSON format ([`export`]).
//! - `sortinghat` resolves connection parameters from defaults,
//!   `SORTINGHAT_DB_*` environment variables, the `~/.sortinghat` file and
//!   command-line flags ([`config`]), then dispatches to a subcommand from
//!   the central registry ([`cmd`]).

pub mod cli;
pub mod cmd;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod export;
pub mod model;
pub mod parsing;

pub use errors::{Error, Result};
