//! remote::factory
//!
//! Provider selection and creation.
//!
//! # Design
//!
//! Callers use [`create_provider`] instead of constructing concrete
//! providers, so the CLI never names a hosting service directly.
//!
//! # Provider Detection
//!
//! Configured remotes win over well-known hosts:
//! 1. A [`ProviderOverride`] whose `domain` matches the remote host
//! 2. `github.com`, `gitlab.com`, `bitbucket.org`, `gitea.com`, `codeberg.org`
//! 3. `dev.azure.com`, `ssh.dev.azure.com`, `*.visualstudio.com`
//! 4. `*.googlesource.com`
//!
//! # Example
//!
//! ```
//! use remotelink::remote::{create_provider, ProviderSettings};
//!
//! let provider = create_provider(
//!     "git@github.com:octocat/hello-world.git",
//!     &ProviderSettings::default(),
//!     None,
//! ).unwrap();
//! assert_eq!(provider.id(), "github");
//! assert_eq!(provider.base_url(), "https://github.com/octocat/hello-world");
//! ```

use tracing::debug;

use super::identity::ProviderIdentity;
use super::providers::{
    AzureDevOpsProvider, BitbucketProvider, BitbucketServerProvider, CustomProvider,
    CustomUrlTemplates, GerritFlavor, GerritProvider, GitHubProvider, GitLabProvider,
    GiteaProvider,
};
use super::traits::{RemoteError, RemoteProvider};
use super::url::{parse_remote_url, ParsedRemote};

/// Supported provider kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    GitHub,
    GitLab,
    Bitbucket,
    BitbucketServer,
    AzureDevOps,
    Gerrit,
    GoogleSource,
    Gitea,
    /// Driven by user URL templates.
    Custom,
}

impl ProviderKind {
    /// Get all provider kinds.
    ///
    /// # Example
    ///
    /// ```
    /// use remotelink::remote::ProviderKind;
    ///
    /// assert!(ProviderKind::all().contains(&ProviderKind::GitHub));
    /// ```
    pub fn all() -> &'static [ProviderKind] {
        &[
            ProviderKind::GitHub,
            ProviderKind::GitLab,
            ProviderKind::Bitbucket,
            ProviderKind::BitbucketServer,
            ProviderKind::AzureDevOps,
            ProviderKind::Gerrit,
            ProviderKind::GoogleSource,
            ProviderKind::Gitea,
            ProviderKind::Custom,
        ]
    }

    /// Name used in configuration files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::GitHub => "github",
            ProviderKind::GitLab => "gitlab",
            ProviderKind::Bitbucket => "bitbucket",
            ProviderKind::BitbucketServer => "bitbucket-server",
            ProviderKind::AzureDevOps => "azure-devops",
            ProviderKind::Gerrit => "gerrit",
            ProviderKind::GoogleSource => "google-source",
            ProviderKind::Gitea => "gitea",
            ProviderKind::Custom => "custom",
        }
    }

    /// Human-readable name, as shown in link titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::GitHub => "GitHub",
            ProviderKind::GitLab => "GitLab",
            ProviderKind::Bitbucket => "Bitbucket",
            ProviderKind::BitbucketServer => "Bitbucket Server",
            ProviderKind::AzureDevOps => "Azure DevOps",
            ProviderKind::Gerrit => "Gerrit",
            ProviderKind::GoogleSource => "Google Source",
            ProviderKind::Gitea => "Gitea",
            ProviderKind::Custom => "Custom",
        }
    }

    /// Hosts detected without configuration. `*.` marks a suffix match.
    pub fn well_known_hosts(&self) -> &'static [&'static str] {
        match self {
            ProviderKind::GitHub => &["github.com", "www.github.com"],
            ProviderKind::GitLab => &["gitlab.com"],
            ProviderKind::Bitbucket => &["bitbucket.org"],
            ProviderKind::AzureDevOps => {
                &["dev.azure.com", "ssh.dev.azure.com", "*.visualstudio.com"]
            }
            ProviderKind::GoogleSource => &["*.googlesource.com"],
            ProviderKind::Gitea => &["gitea.com", "codeberg.org"],
            ProviderKind::BitbucketServer | ProviderKind::Gerrit | ProviderKind::Custom => &[],
        }
    }

    /// Parse a kind from its name. Case and `_`/`-` are not significant.
    ///
    /// # Example
    ///
    /// ```
    /// use remotelink::remote::ProviderKind;
    ///
    /// assert_eq!(ProviderKind::parse("Bitbucket_Server"), Some(ProviderKind::BitbucketServer));
    /// assert_eq!(ProviderKind::parse("unknown"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == normalized)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A configured mapping from a host to a provider kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOverride {
    /// Host to match, compared case-insensitively (may include a port).
    pub domain: String,
    pub kind: ProviderKind,
    /// Display name replacing the composed one.
    pub name: Option<String>,
    pub protocol: Option<String>,
    /// Required when `kind` is [`ProviderKind::Custom`].
    pub templates: Option<CustomUrlTemplates>,
}

impl ProviderOverride {
    pub fn new(domain: impl Into<String>, kind: ProviderKind) -> Self {
        Self {
            domain: domain.into(),
            kind,
            name: None,
            protocol: None,
            templates: None,
        }
    }

    fn matches(&self, domain: &str) -> bool {
        self.domain.eq_ignore_ascii_case(domain)
    }
}

/// Inputs to provider creation beyond the remote URL.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    /// Configured remotes, checked before well-known hosts.
    pub remotes: Vec<ProviderOverride>,
    /// Protocol for web links when a configured remote does not set one.
    pub protocol: Option<String>,
}

/// Detect the provider kind of a remote URL.
///
/// # Returns
///
/// `Some(kind)` if a configured remote or well-known host matches.
///
/// # Example
///
/// ```
/// use remotelink::remote::{detect_provider, ProviderKind};
///
/// assert_eq!(
///     detect_provider("git@gitlab.com:group/project.git", &[]),
///     Some(ProviderKind::GitLab)
/// );
/// assert_eq!(detect_provider("git@unknown.test:o/r.git", &[]), None);
/// ```
pub fn detect_provider(remote_url: &str, remotes: &[ProviderOverride]) -> Option<ProviderKind> {
    let parsed = parse_remote_url(remote_url)?;
    if let Some(entry) = remotes.iter().find(|r| r.matches(&parsed.domain)) {
        return Some(entry.kind);
    }
    detect_well_known(&parsed.domain)
}

fn detect_well_known(domain: &str) -> Option<ProviderKind> {
    let kind = match domain {
        "github.com" | "www.github.com" => ProviderKind::GitHub,
        "gitlab.com" => ProviderKind::GitLab,
        "bitbucket.org" => ProviderKind::Bitbucket,
        "gitea.com" | "codeberg.org" => ProviderKind::Gitea,
        "dev.azure.com" | "ssh.dev.azure.com" => ProviderKind::AzureDevOps,
        d if d.ends_with(".visualstudio.com") => ProviderKind::AzureDevOps,
        d if d.ends_with(".googlesource.com") => ProviderKind::GoogleSource,
        _ => return None,
    };
    Some(kind)
}

/// Create a provider for a remote URL.
///
/// # Arguments
///
/// * `remote_url` - Git remote URL (scp-like, `ssh://` or `http(s)://`)
/// * `settings` - Configured remotes and default protocol
/// * `provider_override` - Kind name to use instead of detection
///
/// # Errors
///
/// - `RemoteError::NotFound` if the URL cannot be parsed, no provider matches,
///   or the override names an unknown kind
/// - `RemoteError::Unsupported` if a custom provider has no URL templates
pub fn create_provider(
    remote_url: &str,
    settings: &ProviderSettings,
    provider_override: Option<&str>,
) -> Result<Box<dyn RemoteProvider>, RemoteError> {
    let parsed = parse_remote_url(remote_url).ok_or_else(|| {
        RemoteError::NotFound(format!("could not parse remote URL '{}'", remote_url))
    })?;
    let entry = settings.remotes.iter().find(|r| r.matches(&parsed.domain));

    let kind = match (provider_override, entry) {
        (Some(name), _) => ProviderKind::parse(name).ok_or_else(|| {
            RemoteError::NotFound(format!(
                "unknown provider '{}'. Available providers: {}",
                name,
                available_providers_string()
            ))
        })?,
        (None, Some(entry)) => entry.kind,
        (None, None) => detect_well_known(&parsed.domain).ok_or_else(|| {
            RemoteError::NotFound(format!(
                "could not detect a provider for '{}'. Supported providers: {}",
                remote_url,
                available_providers_string()
            ))
        })?,
    };

    debug!(
        kind = kind.name(),
        domain = %parsed.domain,
        configured = entry.is_some(),
        "creating provider"
    );
    create_provider_for_kind(kind, &parsed, settings, entry)
}

fn create_provider_for_kind(
    kind: ProviderKind,
    parsed: &ParsedRemote,
    settings: &ProviderSettings,
    entry: Option<&ProviderOverride>,
) -> Result<Box<dyn RemoteProvider>, RemoteError> {
    let (domain, path) = normalize_location(kind, &parsed.domain, &parsed.path);
    let protocol = entry
        .and_then(|e| e.protocol.clone())
        .or_else(|| settings.protocol.clone())
        .unwrap_or_else(|| parsed.web_protocol().to_string());

    let identity = ProviderIdentity::builder(domain, path)
        .protocol(protocol)
        .name_opt(entry.and_then(|e| e.name.clone()))
        .custom(entry.is_some())
        .build();

    let provider: Box<dyn RemoteProvider> = match kind {
        ProviderKind::GitHub => Box::new(GitHubProvider::new(identity)),
        ProviderKind::GitLab => Box::new(GitLabProvider::new(identity)),
        ProviderKind::Bitbucket => Box::new(BitbucketProvider::new(identity)),
        ProviderKind::BitbucketServer => Box::new(BitbucketServerProvider::new(identity)),
        ProviderKind::AzureDevOps => Box::new(AzureDevOpsProvider::new(identity)),
        ProviderKind::Gerrit => Box::new(GerritProvider::new(identity, GerritFlavor::Gerrit)),
        ProviderKind::GoogleSource => {
            Box::new(GerritProvider::new(identity, GerritFlavor::GoogleSource))
        }
        ProviderKind::Gitea => Box::new(GiteaProvider::new(identity)),
        ProviderKind::Custom => {
            let templates = entry.and_then(|e| e.templates.clone()).ok_or_else(|| {
                RemoteError::Unsupported(format!(
                    "custom provider for '{}' has no URL templates",
                    parsed.domain
                ))
            })?;
            Box::new(CustomProvider::new(identity, templates))
        }
    };

    Ok(provider)
}

/// Rewrite clone locations into the location web links use.
fn normalize_location(kind: ProviderKind, domain: &str, path: &str) -> (String, String) {
    match kind {
        ProviderKind::AzureDevOps => AzureDevOpsProvider::normalize(domain, path),
        ProviderKind::BitbucketServer => (
            domain.to_string(),
            path.strip_prefix("scm/").unwrap_or(path).to_string(),
        ),
        ProviderKind::Gerrit => (
            domain.to_string(),
            path.strip_prefix("a/").unwrap_or(path).to_string(),
        ),
        _ => (domain.to_string(), path.to_string()),
    }
}

fn available_providers_string() -> String {
    ProviderKind::all()
        .iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Provider names accepted in configuration.
pub fn valid_provider_names() -> Vec<&'static str> {
    ProviderKind::all().iter().map(|p| p.name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod provider_kind {
        use super::*;

        #[test]
        fn names_round_trip() {
            for kind in ProviderKind::all() {
                assert_eq!(ProviderKind::parse(kind.name()), Some(*kind));
            }
        }

        #[test]
        fn parse_is_lenient() {
            assert_eq!(ProviderKind::parse("GitHub"), Some(ProviderKind::GitHub));
            assert_eq!(
                ProviderKind::parse("azure_devops"),
                Some(ProviderKind::AzureDevOps)
            );
        }

        #[test]
        fn parse_unknown() {
            assert_eq!(ProviderKind::parse("sourcehut"), None);
            assert_eq!(ProviderKind::parse(""), None);
        }

        #[test]
        fn well_known_hosts_are_detected() {
            for kind in ProviderKind::all() {
                for host in kind.well_known_hosts() {
                    let host = host.replace("*.", "acme.");
                    let url = format!("https://{}/o/r.git", host);
                    assert_eq!(detect_provider(&url, &[]), Some(*kind), "{}", host);
                }
            }
        }

        #[test]
        fn display_names_match_providers() {
            let provider = create_provider(
                "git@gitlab.com:group/project.git",
                &ProviderSettings::default(),
                None,
            )
            .unwrap();
            assert_eq!(provider.canonical_name(), ProviderKind::GitLab.display_name());
        }

        #[test]
        fn display() {
            assert_eq!(format!("{}", ProviderKind::BitbucketServer), "bitbucket-server");
        }
    }

    mod detect_provider {
        use super::*;

        #[test]
        fn well_known_hosts() {
            let cases = [
                ("git@github.com:o/r.git", ProviderKind::GitHub),
                ("https://gitlab.com/g/p.git", ProviderKind::GitLab),
                ("git@bitbucket.org:t/r.git", ProviderKind::Bitbucket),
                ("git@ssh.dev.azure.com:v3/o/p/r", ProviderKind::AzureDevOps),
                ("https://org.visualstudio.com/p/_git/r", ProviderKind::AzureDevOps),
                ("https://chromium.googlesource.com/chromium/src", ProviderKind::GoogleSource),
                ("https://codeberg.org/o/r.git", ProviderKind::Gitea),
            ];
            for (url, kind) in cases {
                assert_eq!(detect_provider(url, &[]), Some(kind), "{}", url);
            }
        }

        #[test]
        fn configured_remote_wins() {
            let remotes = [ProviderOverride::new("GitHub.com", ProviderKind::Gitea)];
            assert_eq!(
                detect_provider("git@github.com:o/r.git", &remotes),
                Some(ProviderKind::Gitea)
            );
        }

        #[test]
        fn unknown_host() {
            assert_eq!(detect_provider("git@git.corp.example:o/r.git", &[]), None);
            assert_eq!(detect_provider("not a url", &[]), None);
        }
    }

    mod create_provider {
        use super::*;

        #[test]
        fn github_auto_detect() {
            let p = create_provider("git@github.com:o/r.git", &ProviderSettings::default(), None)
                .unwrap();
            assert_eq!(p.id(), "github");
            assert_eq!(p.display_name(), "GitHub");
            assert!(!p.identity().is_custom());
        }

        #[test]
        fn http_remote_keeps_http() {
            let p = create_provider(
                "http://git.local:3000/o/r.git",
                &ProviderSettings::default(),
                Some("gitea"),
            )
            .unwrap();
            assert_eq!(p.base_url(), "http://git.local:3000/o/r");
        }

        #[test]
        fn azure_ssh_is_normalized() {
            let p = create_provider(
                "git@ssh.dev.azure.com:v3/org/project/repo",
                &ProviderSettings::default(),
                None,
            )
            .unwrap();
            assert_eq!(p.base_url(), "https://dev.azure.com/org/project/_git/repo");
        }

        #[test]
        fn configured_self_hosted_gitlab() {
            let mut entry = ProviderOverride::new("git.corp.example", ProviderKind::GitLab);
            entry.protocol = Some("http".into());
            let settings = ProviderSettings {
                remotes: vec![entry],
                protocol: None,
            };
            let p = create_provider("git@git.corp.example:team/app.git", &settings, None).unwrap();
            assert_eq!(p.id(), "gitlab");
            assert_eq!(p.display_name(), "GitLab (git.corp.example)");
            assert_eq!(p.base_url(), "http://git.corp.example/team/app");
        }

        #[test]
        fn configured_name_is_used_verbatim() {
            let mut entry = ProviderOverride::new("git.corp.example", ProviderKind::GitLab);
            entry.name = Some("Corp Git".into());
            let settings = ProviderSettings {
                remotes: vec![entry],
                protocol: None,
            };
            let p = create_provider("git@git.corp.example:team/app.git", &settings, None).unwrap();
            assert_eq!(p.display_name(), "Corp Git");
        }

        #[test]
        fn settings_protocol_applies() {
            let settings = ProviderSettings {
                remotes: Vec::new(),
                protocol: Some("http".into()),
            };
            let p = create_provider("git@github.com:o/r.git", &settings, None).unwrap();
            assert_eq!(p.base_url(), "http://github.com/o/r");
        }

        #[test]
        fn bitbucket_server_strips_scm() {
            let p = create_provider(
                "https://git.corp.example/scm/proj/tool.git",
                &ProviderSettings::default(),
                Some("bitbucket-server"),
            )
            .unwrap();
            assert_eq!(p.base_url(), "https://git.corp.example/projects/PROJ/repos/tool");
        }

        #[test]
        fn custom_without_templates_is_unsupported() {
            let settings = ProviderSettings {
                remotes: vec![ProviderOverride::new("git.corp.example", ProviderKind::Custom)],
                protocol: None,
            };
            let result = create_provider("git@git.corp.example:o/r.git", &settings, None);
            assert!(matches!(result, Err(RemoteError::Unsupported(_))));
        }

        #[test]
        fn custom_with_templates() {
            let mut entry = ProviderOverride::new("git.corp.example", ProviderKind::Custom);
            entry.templates = Some(CustomUrlTemplates {
                repository: "https://web.corp.example/${repo}".into(),
                branch: "https://web.corp.example/${repo}/b/${branch}".into(),
                commit: "https://web.corp.example/${repo}/c/${id}".into(),
                file: "https://web.corp.example/${repo}/f/${file}".into(),
                ..Default::default()
            });
            let settings = ProviderSettings {
                remotes: vec![entry],
                protocol: None,
            };
            let p = create_provider("git@git.corp.example:o/r.git", &settings, None).unwrap();
            assert_eq!(p.url_for_commit("abc"), "https://web.corp.example/o/r/c/abc");
            assert_eq!(p.display_name(), "Custom (git.corp.example)");
        }

        #[test]
        fn unknown_url_is_not_found() {
            let result = create_provider("git@unknown.test:o/r.git", &ProviderSettings::default(), None);
            assert!(matches!(result, Err(RemoteError::NotFound(_))));
        }

        #[test]
        fn unknown_override_is_not_found() {
            let result = create_provider(
                "git@github.com:o/r.git",
                &ProviderSettings::default(),
                Some("sourcehut"),
            );
            match result {
                Err(RemoteError::NotFound(msg)) => assert!(msg.contains("github, gitlab")),
                _ => panic!("expected NotFound"),
            }
        }
    }

    #[test]
    fn valid_names_include_custom() {
        let names = valid_provider_names();
        assert!(names.contains(&"custom"));
        assert!(names.contains(&"google-source"));
    }
}
