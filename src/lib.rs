//! remotelink - Links to branches, commits and files on git hosting services
//!
//! remotelink turns a typed request ("this commit", "lines 10-20 of this
//! file on main", "a pull request from my branch into main") into the web
//! URL for it on whichever service hosts the repository: GitHub, GitLab,
//! Bitbucket, Azure DevOps, Gerrit, Gitea or a self-hosted service
//! described by URL templates.
//!
//! # Architecture
//!
//! - [`remote`] - Resources, providers and batch copy / open
//! - [`system`] - Clipboard and browser side effects
//! - [`git`] - Remote URL lookup
//! - [`core`] - Configuration
//! - [`cli`] - Command-line interface (`rl`)
//! - [`ui`] - User-facing output
//!
//! # Example
//!
//! ```
//! use remotelink::remote::{create_provider, ProviderSettings, RemoteProvider, RemoteResource};
//!
//! # tokio_test::block_on(async {
//! let provider = create_provider(
//!     "git@github.com:octocat/hello-world.git",
//!     &ProviderSettings::default(),
//!     None,
//! )
//! .unwrap();
//!
//! let url = provider.resolve(&RemoteResource::commit("7fd1a60")).await.unwrap();
//! assert_eq!(
//!     url.as_deref(),
//!     Some("https://github.com/octocat/hello-world/commit/7fd1a60")
//! );
//! # });
//! ```

pub mod cli;
pub mod core;
pub mod git;
pub mod remote;
pub mod system;
pub mod ui;
