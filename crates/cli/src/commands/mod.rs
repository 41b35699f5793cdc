//! CLI command implementations.

pub mod orders;
pub mod routes;
pub mod session;

use std::fmt::Display;
use std::io::{self, Write};

/// Write one line of command output to stdout.
///
/// Logs go to stderr, so stdout carries only command results.
fn emit(line: impl Display) -> io::Result<()> {
    writeln!(io::stdout().lock(), "{line}")
}
