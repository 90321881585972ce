//! Process exit codes

/// Successful termination (also used after an interactive interrupt)
pub const OK: i32 = 0;

/// Reported runtime error (`Error: <message>` on stderr)
pub const ERROR: i32 = 1;
