//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each link command handler:
//! 1. Finds the remote URL (flag, repository remote or config)
//! 2. Builds a provider through [`crate::remote::create_provider`]
//! 3. Runs the batch operation and reports the outcome
//!
//! # Async Commands
//!
//! Resolution is async because some providers look things up before they can
//! build a link. Handlers are sync and drive the async work on a
//! `tokio::runtime::Runtime` they create.

mod autolinks;
mod completion;
mod config_cmd;
mod link;
mod providers;

// Re-export command functions for testing and direct invocation
pub use autolinks::autolinks;
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use link::{copy, open, url};
pub use providers::providers;

use anyhow::{anyhow, Context as _, Result};
use tracing::debug;

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use crate::core::config::Config;
use crate::git::{Git, GitError};
use crate::remote::{create_provider, RemoteProvider};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Url { resource } => link::url(ctx, &resource),
        Command::Open { print, resource } => link::open(ctx, &resource, print),
        Command::Copy { resource } => link::copy(ctx, &resource),
        Command::Providers { json } => providers::providers(json),
        Command::Autolinks { json } => autolinks::autolinks(ctx, json),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value, global } => {
                config_cmd::set(ctx, &key, &value, global)
            }
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// The repository (if any), its configuration and the provider for the
/// selected remote.
pub(crate) struct Target {
    pub git: Option<Git>,
    pub config: Config,
    pub provider: Box<dyn RemoteProvider>,
}

/// Open the repository around the working directory, if there is one, and
/// load configuration for it.
pub(crate) fn open_repo(ctx: &Context) -> Result<(Option<Git>, Config)> {
    let cwd = ctx.cwd()?;
    let git = match Git::open(&cwd) {
        Ok(git) => Some(git),
        Err(GitError::NotARepo { .. }) => None,
        Err(e) => return Err(e).context("Failed to open repository"),
    };
    let root = git.as_ref().map(Git::root);
    let config = Config::load(root.as_deref()).context("Failed to load config")?;
    Ok((git, config))
}

/// Resolve the git remote URL to link into.
///
/// `--remote-url` wins. Otherwise the named remote (flag, then config) is
/// read from the repository; when no name was given and `origin` is
/// missing, the repository's first remote is used.
pub(crate) fn remote_url(ctx: &Context, git: Option<&Git>, config: &Config) -> Result<String> {
    if let Some(url) = &ctx.remote_url {
        return Ok(url.clone());
    }

    let git = git.ok_or_else(|| {
        anyhow!("Not inside a git repository. Run from a repository or pass --remote-url.")
    })?;

    if let Some(name) = &ctx.remote {
        return git
            .require_remote_url(name)
            .with_context(|| format!("Failed to read remote '{}'", name));
    }

    let name = config.remote();
    if let Some(url) = git.remote_url(name)? {
        return Ok(url);
    }

    let fallback = git
        .default_remote()?
        .ok_or_else(|| anyhow!("Repository has no remotes. Add one or pass --remote-url."))?;
    debug!(configured = name, fallback = %fallback, "configured remote missing");
    git.require_remote_url(&fallback)
        .with_context(|| format!("Failed to read remote '{}'", fallback))
}

/// Build the provider for the selected remote.
pub(crate) fn load_target(ctx: &Context) -> Result<Target> {
    let (git, config) = open_repo(ctx)?;
    let url = remote_url(ctx, git.as_ref(), &config)?;
    let provider = provider_for(ctx, &config, &url)?;

    Ok(Target {
        git,
        config,
        provider,
    })
}

/// Build the provider for an arbitrary remote URL.
pub(crate) fn provider_for(
    ctx: &Context,
    config: &Config,
    url: &str,
) -> Result<Box<dyn RemoteProvider>> {
    let settings = config
        .provider_settings()
        .context("Invalid remote configuration")?;
    let provider = create_provider(url, &settings, ctx.provider.as_deref())
        .with_context(|| format!("Cannot link into '{}'", url))?;

    debug!(
        provider = provider.id(),
        domain = provider.domain(),
        path = provider.path(),
        "selected provider"
    );
    Ok(provider)
}
