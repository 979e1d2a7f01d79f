//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing text goes through this module so quiet and debug modes
//! behave the same across commands. Library diagnostics use `tracing`
//! instead.

pub mod output;
