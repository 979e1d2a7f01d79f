//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Links go to stdout one per line so they can be piped. Everything else
//! respects the quiet flag; diagnostics go to stderr. `--json` output is
//! produced with [`print_json`].

use std::fmt::Display;

use serde::Serialize;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - links and errors only
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a link. Always shown, since links are the command's result.
pub fn link(url: &str) {
    println!("{}", url);
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("{}", message);
    }
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format `key  value` rows with the keys padded to a common width.
pub fn format_rows<K: Display, V: Display>(rows: &[(K, V)]) -> String {
    let keys: Vec<String> = rows.iter().map(|(k, _)| k.to_string()).collect();
    let width = keys.iter().map(|k| k.len()).max().unwrap_or(0);

    keys.iter()
        .zip(rows)
        .map(|(key, (_, value))| format!("{:width$}  {}", key, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
