//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$REMOTELINK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/remotelink/config.toml`
//! 3. `~/.remotelink/config.toml` (canonical write location)
//!
//! # Repo Config
//!
//! Located at `.git/remotelink/config.toml`.
//!
//! # Validation
//!
//! Values are validated after parsing: provider types must be known, custom
//! remotes must carry their required URL templates and protocols must be
//! `http` or `https`.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::remote::providers::CustomUrlTemplates;
use crate::remote::{valid_provider_names, ProviderKind, ProviderOverride};

/// Protocols accepted for web links.
pub const VALID_PROTOCOLS: &[&str] = &["https", "http"];

/// Keys accepted by `config get` / `config set`.
pub const SETTABLE_KEYS: &[&str] = &["remote", "protocol"];

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// protocol = "https"
///
/// [[remotes]]
/// domain = "git.corp.example"
/// type = "gitlab"
/// name = "Corp GitLab"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Default git remote name
    pub remote: Option<String>,

    /// Default web protocol
    pub protocol: Option<String>,

    /// Configured remotes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remotes: Vec<RemoteEntry>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_scope(self.remote.as_deref(), self.protocol.as_deref(), &self.remotes)
    }

    /// Set a scalar key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        set_scalar(&mut self.remote, &mut self.protocol, key, value)
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// remote = "upstream"
///
/// [[remotes]]
/// domain = "code.internal"
/// type = "custom"
///
/// [remotes.urls]
/// repository = "https://code.internal/${repo}"
/// branch = "https://code.internal/${repo}/tree/${branch}"
/// commit = "https://code.internal/${repo}/commit/${id}"
/// file = "https://code.internal/${repo}/blob/${file}${line}"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Remote name (default: "origin")
    pub remote: Option<String>,

    /// Web protocol override
    pub protocol: Option<String>,

    /// Configured remotes, checked before global ones
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remotes: Vec<RemoteEntry>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_scope(self.remote.as_deref(), self.protocol.as_deref(), &self.remotes)
    }

    /// Set a scalar key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        set_scalar(&mut self.remote, &mut self.protocol, key, value)
    }
}

/// A host mapped to a provider type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RemoteEntry {
    /// Host of the git remote (may include a port)
    pub domain: String,

    /// Provider type (e.g. "gitlab", "custom")
    #[serde(rename = "type")]
    pub kind: String,

    /// Display name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Web protocol for this host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// URL templates, for `type = "custom"` only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<CustomUrlTemplates>,
}

impl RemoteEntry {
    /// Validate the entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_override().map(|_| ())
    }

    /// Convert into the factory's override form.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidValue` when the domain is empty, the type is
    /// unknown, the protocol is invalid or the templates do not match the type.
    pub fn to_override(&self) -> Result<ProviderOverride, ConfigError> {
        if self.domain.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "remote domain cannot be empty".to_string(),
            ));
        }

        let kind = ProviderKind::parse(&self.kind).ok_or_else(|| {
            ConfigError::InvalidValue(format!(
                "invalid remote type '{}' for '{}', must be one of: {}",
                self.kind,
                self.domain,
                valid_provider_names().join(", ")
            ))
        })?;

        if let Some(protocol) = &self.protocol {
            validate_protocol(protocol)?;
        }

        match (kind, &self.urls) {
            (ProviderKind::Custom, None) => {
                return Err(ConfigError::InvalidValue(format!(
                    "custom remote '{}' requires a [remotes.urls] table",
                    self.domain
                )));
            }
            (ProviderKind::Custom, Some(urls)) => {
                let missing = urls.missing_required();
                if !missing.is_empty() {
                    return Err(ConfigError::InvalidValue(format!(
                        "custom remote '{}' is missing url templates: {}",
                        self.domain,
                        missing.join(", ")
                    )));
                }
            }
            (_, Some(_)) => {
                return Err(ConfigError::InvalidValue(format!(
                    "remote '{}' sets urls but is not type = \"custom\"",
                    self.domain
                )));
            }
            (_, None) => {}
        }

        Ok(ProviderOverride {
            domain: self.domain.trim().to_lowercase(),
            kind,
            name: self.name.clone(),
            protocol: self.protocol.clone(),
            templates: self.urls.clone(),
        })
    }
}

fn validate_scope(
    remote: Option<&str>,
    protocol: Option<&str>,
    remotes: &[RemoteEntry],
) -> Result<(), ConfigError> {
    if let Some(remote) = remote {
        if remote.is_empty() {
            return Err(ConfigError::InvalidValue(
                "remote cannot be empty".to_string(),
            ));
        }
    }

    if let Some(protocol) = protocol {
        validate_protocol(protocol)?;
    }

    for entry in remotes {
        entry.validate()?;
    }

    Ok(())
}

fn validate_protocol(protocol: &str) -> Result<(), ConfigError> {
    if VALID_PROTOCOLS.contains(&protocol) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!(
            "invalid protocol '{}', must be one of: {}",
            protocol,
            VALID_PROTOCOLS.join(", ")
        )))
    }
}

fn set_scalar(
    remote: &mut Option<String>,
    protocol: &mut Option<String>,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    match key {
        "remote" => {
            if value.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "remote cannot be empty".to_string(),
                ));
            }
            *remote = Some(value.to_string());
        }
        "protocol" => {
            validate_protocol(value)?;
            *protocol = Some(value.to_string());
        }
        _ => {
            return Err(ConfigError::InvalidValue(format!(
                "unknown key '{}', must be one of: {}",
                key,
                SETTABLE_KEYS.join(", ")
            )));
        }
    }
    Ok(())
}
