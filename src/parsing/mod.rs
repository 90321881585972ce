//! Parsers for external identity-source formats.

pub mod mozilla;

pub use mozilla::{MozilliansParser, MOZILLIANS_ORG};
