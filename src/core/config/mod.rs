//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! remotelink has two configuration scopes:
//! - **Global**: User-level settings and remotes
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! Configured remotes are merged rather than replaced: repo entries are
//! checked first, so a repo can re-map a host the global config also maps.
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$REMOTELINK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/remotelink/config.toml`
//! 3. `~/.remotelink/config.toml` (canonical write location)
//!
//! # Repo Config Location
//!
//! `.git/remotelink/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use remotelink::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo"))).unwrap();
//! println!("Remote: {}", config.remote());
//! let settings = config.provider_settings().unwrap();
//! println!("{} configured remotes", settings.remotes.len());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RemoteEntry, RepoConfig, SETTABLE_KEYS};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::remote::{ProviderSettings, DEFAULT_PROTOCOL};

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "REMOTELINK_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence rules: repo config overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `repo_path` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or fail
    /// validation. Missing config files are not an error.
    pub fn load(repo_path: Option<&Path>) -> Result<Config, ConfigError> {
        let (global, global_path) = Self::load_global()?;

        let (repo, repo_path_found) = match repo_path {
            Some(path) => Self::load_repo(path)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        debug!(
            global = ?global_path,
            repo = ?repo_path_found,
            "loaded configuration"
        );

        Ok(Config {
            global,
            repo,
            global_path,
            repo_path: repo_path_found,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("remotelink/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".remotelink/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    /// Load repository configuration.
    fn load_repo(repo_path: &Path) -> Result<(Option<RepoConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::repo_config_path(repo_path);
        if !path.exists() {
            return Ok((None, None));
        }
        let config = Self::read_config(&path)?;
        Ok((Some(config), Some(path)))
    }

    /// Read and parse a config file.
    fn read_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path global config is written to.
    ///
    /// `$REMOTELINK_CONFIG` when set, otherwise `~/.remotelink/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".remotelink/config.toml"))
    }

    /// Get the canonical path for repo config.
    ///
    /// Returns `.git/remotelink/config.toml` relative to the given repo path.
    pub fn repo_config_path(repo_path: &Path) -> PathBuf {
        repo_path.join(".git/remotelink/config.toml")
    }

    /// Write global config atomically.
    pub fn write_global(config: &GlobalConfig) -> Result<PathBuf, ConfigError> {
        config.validate()?;
        let path = Self::global_config_path()?;
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write repo config atomically.
    pub fn write_repo(repo_path: &Path, config: &RepoConfig) -> Result<PathBuf, ConfigError> {
        config.validate()?;
        let path = Self::repo_config_path(repo_path);
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write a config file atomically (temp file in the same directory, then rename).
    fn write_config_atomic<T: serde::Serialize>(
        path: &Path,
        config: &T,
    ) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the git remote name.
    ///
    /// Defaults to "origin" if not configured.
    pub fn remote(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.remote.as_deref())
            .or(self.global.remote.as_deref())
            .unwrap_or("origin")
    }

    /// Get the configured web protocol, if any.
    pub fn protocol(&self) -> Option<&str> {
        self.repo
            .as_ref()
            .and_then(|r| r.protocol.as_deref())
            .or(self.global.protocol.as_deref())
    }

    /// All configured remotes, repo entries first.
    pub fn remotes(&self) -> impl Iterator<Item = &RemoteEntry> {
        self.repo
            .iter()
            .flat_map(|r| r.remotes.iter())
            .chain(self.global.remotes.iter())
    }

    /// Look up a scalar key with precedence applied.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "remote" => Ok(self.remote().to_string()),
            "protocol" => Ok(self.protocol().unwrap_or(DEFAULT_PROTOCOL).to_string()),
            _ => Err(ConfigError::InvalidValue(format!(
                "unknown key '{}', must be one of: {}",
                key,
                SETTABLE_KEYS.join(", ")
            ))),
        }
    }

    /// Every effective setting as `key = value` pairs.
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = SETTABLE_KEYS
            .iter()
            .filter_map(|key| self.get(key).ok().map(|v| (key.to_string(), v)))
            .collect();

        for remote in self.remotes() {
            entries.push((format!("remotes.{}", remote.domain), remote.kind.clone()));
        }

        entries
    }

    /// Settings for provider creation.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidValue` if a configured remote is invalid.
    pub fn provider_settings(&self) -> Result<ProviderSettings, ConfigError> {
        let remotes = self
            .remotes()
            .map(RemoteEntry::to_override)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProviderSettings {
            remotes,
            protocol: self.protocol().map(String::from),
        })
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}
