//! git
//!
//! Single interface for reading repository identity.
//!
//! # Architecture
//!
//! This module is the only doorway to Git. No other module imports `git2`.
//! Links are built from the URL of a remote, so the interface is limited to
//! repository discovery, remote lookup and HEAD.
//!
//! # Example
//!
//! ```no_run
//! use remotelink::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! let remote = git.default_remote().unwrap().unwrap_or_else(|| "origin".into());
//! let url = git.require_remote_url(&remote).unwrap();
//! println!("{} -> {}", remote, url);
//! ```

mod interface;

pub use interface::{Git, GitError};
