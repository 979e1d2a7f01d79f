//! config command - Get, set, or list configuration values

use anyhow::{anyhow, Context as _, Result};

use super::open_repo;
use crate::cli::Context;
use crate::core::config::Config;
use crate::ui::output;

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let (_, config) = open_repo(ctx)?;
    let value = config.get(key)?;
    println!("{}", value);
    Ok(())
}

/// Set a configuration value.
///
/// Writes the repository's config unless `global` is set or there is no
/// repository.
pub fn set(ctx: &Context, key: &str, value: &str, global: bool) -> Result<()> {
    let (git, config) = open_repo(ctx)?;

    let path = match git {
        Some(git) if !global => {
            let mut repo = config.repo.unwrap_or_default();
            repo.set(key, value)?;
            Config::write_repo(&git.root(), &repo).context("Failed to write config")?
        }
        None if !global => {
            return Err(anyhow!(
                "Not inside a git repository. Use --global to set '{}' for all repositories.",
                key
            ));
        }
        _ => {
            let mut global_config = config.global;
            global_config.set(key, value)?;
            Config::write_global(&global_config).context("Failed to write config")?
        }
    };

    output::debug(format!("wrote {}", path.display()), ctx.verbosity());
    output::success(format!("Set {} = {}", key, value), ctx.verbosity());

    Ok(())
}

/// List all effective configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let (git, config) = open_repo(ctx)?;

    if let Some(path) = config.global_config_loaded_from() {
        output::debug(format!("global config: {}", path.display()), ctx.verbosity());
    }
    if let Some(path) = config.repo_config_loaded_from() {
        output::debug(format!("repo config: {}", path.display()), ctx.verbosity());
    }
    if git.is_none() {
        output::debug("not inside a git repository", ctx.verbosity());
    }

    let rows: Vec<(String, String)> = config.list();
    println!("{}", output::format_rows(&rows));

    Ok(())
}
