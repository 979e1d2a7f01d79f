//! core
//!
//! Configuration shared by the CLI and library callers.
//!
//! # Modules
//!
//! - [`config`] - Configuration schema and loading

pub mod config;
