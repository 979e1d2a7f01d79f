//! remote::identity
//!
//! Immutable identity of a repository on a hosting service.

use std::sync::OnceLock;

/// Default protocol for web links.
pub const DEFAULT_PROTOCOL: &str = "https";

/// Where a repository lives: host, `owner/name` path and web protocol.
///
/// Fixed at construction. The remote key is computed on first use and cached
/// for the lifetime of the value.
#[derive(Debug)]
pub struct ProviderIdentity {
    domain: String,
    path: String,
    protocol: String,
    name: Option<String>,
    custom: bool,
    remote_key: OnceLock<String>,
}

impl ProviderIdentity {
    /// Identity with the default `https` protocol and no name override.
    pub fn new(domain: impl Into<String>, path: impl Into<String>) -> Self {
        Self::builder(domain, path).build()
    }

    /// Start building an identity with optional overrides.
    pub fn builder(domain: impl Into<String>, path: impl Into<String>) -> IdentityBuilder {
        IdentityBuilder {
            domain: domain.into(),
            path: path.into(),
            protocol: None,
            name: None,
            custom: false,
        }
    }

    /// Host, e.g. `github.com`. May be empty for some on-prem setups.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Repository path on the host, `owner/name`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Whether the provider was configured by the user rather than detected
    /// from a well-known host.
    pub fn is_custom(&self) -> bool {
        self.custom
    }

    /// Explicit display name override, if one was supplied.
    pub fn name_override(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Path segment before the first `/`.
    ///
    /// A path without `/` has an empty owner.
    pub fn owner(&self) -> &str {
        self.split_path().0
    }

    /// Path remainder after the first `/`.
    ///
    /// A path without `/` yields the whole path.
    pub fn repo_name(&self) -> &str {
        self.split_path().1
    }

    /// `domain/path`, or just `path` when the domain is empty.
    pub fn remote_key(&self) -> &str {
        self.remote_key.get_or_init(|| {
            if self.domain.is_empty() {
                self.path.clone()
            } else {
                format!("{}/{}", self.domain, self.path)
            }
        })
    }

    /// `protocol://domain/path`.
    pub fn base_url(&self) -> String {
        self.repo_base_url(&self.path)
    }

    /// Base URL for another repository on the same host.
    pub fn repo_base_url(&self, path: &str) -> String {
        format!("{}://{}/{}", self.protocol, self.domain, path)
    }

    /// Display name: the override verbatim, or `canonical` with
    /// ` (domain)` appended for custom providers.
    pub fn format_name(&self, canonical: &str) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        if self.custom {
            format!("{} ({})", canonical, self.domain)
        } else {
            canonical.to_string()
        }
    }

    fn split_path(&self) -> (&str, &str) {
        match self.path.split_once('/') {
            Some((owner, name)) => (owner, name),
            None => ("", self.path.as_str()),
        }
    }
}

impl Clone for ProviderIdentity {
    fn clone(&self) -> Self {
        Self {
            domain: self.domain.clone(),
            path: self.path.clone(),
            protocol: self.protocol.clone(),
            name: self.name.clone(),
            custom: self.custom,
            remote_key: OnceLock::new(),
        }
    }
}

impl PartialEq for ProviderIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.domain == other.domain
            && self.path == other.path
            && self.protocol == other.protocol
            && self.name == other.name
            && self.custom == other.custom
    }
}

impl Eq for ProviderIdentity {}

/// Builder for [`ProviderIdentity`].
#[derive(Debug, Clone)]
pub struct IdentityBuilder {
    domain: String,
    path: String,
    protocol: Option<String>,
    name: Option<String>,
    custom: bool,
}

impl IdentityBuilder {
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn protocol_opt(mut self, protocol: Option<String>) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name_opt(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn custom(mut self, custom: bool) -> Self {
        self.custom = custom;
        self
    }

    pub fn build(self) -> ProviderIdentity {
        ProviderIdentity {
            domain: self.domain,
            path: self.path,
            protocol: self
                .protocol
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string()),
            name: self.name,
            custom: self.custom,
            remote_key: OnceLock::new(),
        }
    }
}
