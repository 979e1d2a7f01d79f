//! remote::traits
//!
//! The `RemoteProvider` trait shared by every hosting service.
//!
//! # Design
//!
//! Each provider implements one builder per resource kind. Callers never call
//! the builders directly: [`RemoteProvider::resolve`] dispatches a
//! [`RemoteResource`] to the right builder with an exhaustive match, so a new
//! resource variant cannot be added without deciding how it resolves.
//!
//! Resolution is async because a provider may need to look up repository
//! metadata (for example which fork a branch lives in) before it can build a
//! link. Most builders are plain string formatting and stay synchronous.
//!
//! "This provider cannot link that" is `Ok(None)`, not an error. Errors are
//! reserved for malformed resources and failed lookups.
//!
//! # Example
//!
//! ```
//! use remotelink::remote::providers::GitHubProvider;
//! use remotelink::remote::{ProviderIdentity, RemoteProvider, RemoteResource};
//!
//! # tokio_test::block_on(async {
//! let github = GitHubProvider::new(ProviderIdentity::new("github.com", "octocat/hello-world"));
//! let url = github.resolve(&RemoteResource::commit("abc123")).await.unwrap();
//! assert_eq!(url.as_deref(), Some("https://github.com/octocat/hello-world/commit/abc123"));
//! # });
//! ```

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use super::encoding::encode_url;
use super::identity::ProviderIdentity;
use super::resource::{
    ComparisonNotation, LineRange, PullRequestBase, PullRequestHead, PullRequestOptions,
    RemoteResource,
};

/// Placeholder for the issue number in an issue-link pattern.
pub const ISSUE_NUMBER_TOKEN: &str = "<num>";

/// Errors from resolving a resource into a link.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The resource is missing data the provider needs.
    #[error("invalid resource: {0}")]
    InvalidResource(String),

    /// Looking up repository metadata failed.
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// Network or connection error during a lookup.
    #[error("network error: {0}")]
    Network(String),

    /// The remote or provider could not be identified.
    #[error("not found: {0}")]
    NotFound(String),

    /// The requested provider cannot be built.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// What an autolinked reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Branch,
    Commit,
}

/// Describes how issue references (`#123`) turn into links on a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Autolink {
    /// Issue URL with [`ISSUE_NUMBER_TOKEN`] in place of the number.
    pub pattern: String,
    /// Text preceding the number in a reference.
    pub prefix: String,
    /// Hover title, with [`ISSUE_NUMBER_TOKEN`] in place of the number.
    pub title: String,
    pub reference_kind: ReferenceKind,
    /// Whether identifiers may contain letters.
    pub alphanumeric: bool,
    pub case_sensitive: bool,
}

impl Autolink {
    /// The fixed-shape issue autolink for a provider.
    pub fn issue(pattern: String, provider_name: &str) -> Self {
        Self {
            pattern,
            prefix: String::new(),
            title: format!("Open Issue #{} on {}", ISSUE_NUMBER_TOKEN, provider_name),
            reference_kind: ReferenceKind::Branch,
            alphanumeric: false,
            case_sensitive: false,
        }
    }

    /// Expand the pattern for one issue number.
    pub fn url_for(&self, number: &str) -> String {
        self.pattern.replace(ISSUE_NUMBER_TOKEN, number)
    }
}

/// URL-building rules and identity of one git hosting service.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Identity is immutable after
/// construction, so one provider can serve any number of concurrent
/// resolutions.
#[async_trait]
pub trait RemoteProvider: Send + Sync {
    /// Stable provider id (e.g. "github", "gitlab").
    fn id(&self) -> &'static str;

    /// Canonical service name (e.g. "GitHub").
    fn canonical_name(&self) -> &'static str;

    /// Identity of the repository this provider links into.
    fn identity(&self) -> &ProviderIdentity;

    /// Issue URL with [`ISSUE_NUMBER_TOKEN`] in place of the number.
    fn issue_link_pattern(&self) -> String;

    fn url_for_branch(&self, branch: &str) -> String;

    fn url_for_branches(&self) -> String;

    fn url_for_commit(&self, sha: &str) -> String;

    /// `None` when the provider has no comparison view.
    fn url_for_comparison(
        &self,
        base: &str,
        head: &str,
        notation: ComparisonNotation,
    ) -> Option<String>;

    /// Link to a file. `sha` wins over `branch` when both are given.
    fn url_for_file(
        &self,
        file_name: &str,
        branch: Option<&str>,
        sha: Option<&str>,
        range: Option<LineRange>,
    ) -> String;

    fn url_for_repository(&self) -> String {
        encode_url(&self.base_url())
    }

    /// Link to a pull-request creation page.
    ///
    /// Providers without PR creation keep this default, which resolves to
    /// nothing.
    async fn url_for_create_pull_request(
        &self,
        _base: &PullRequestBase,
        _head: &PullRequestHead,
        _options: &PullRequestOptions,
    ) -> Result<Option<String>, RemoteError> {
        Ok(None)
    }

    /// Whether PR-creation links can address a fork of the base repository.
    ///
    /// Providers that cannot discover fork relationships return `false`; their
    /// creation links then omit the fork and callers may skip them.
    async fn is_ready_for_cross_fork_pull_request_urls(&self) -> bool {
        true
    }

    fn base_url(&self) -> String {
        self.identity().base_url()
    }

    fn domain(&self) -> &str {
        self.identity().domain()
    }

    fn path(&self) -> &str {
        self.identity().path()
    }

    fn owner(&self) -> &str {
        self.identity().owner()
    }

    fn repo_name(&self) -> &str {
        self.identity().repo_name()
    }

    fn remote_key(&self) -> &str {
        self.identity().remote_key()
    }

    fn display_name(&self) -> String {
        self.identity().format_name(self.canonical_name())
    }

    fn autolinks(&self) -> Vec<Autolink> {
        vec![Autolink::issue(
            self.issue_link_pattern(),
            &self.display_name(),
        )]
    }

    /// Resolve a resource into a link.
    ///
    /// The default dispatches through [`resolve_resource`]. Overrides should
    /// do their extra work and then delegate to it.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if this provider has no link for the resource.
    ///
    /// # Errors
    ///
    /// - `InvalidResource` if a required field is empty
    /// - Any error from an asynchronous lookup (PR creation only)
    async fn resolve(&self, resource: &RemoteResource) -> Result<Option<String>, RemoteError> {
        resolve_resource(self, resource).await
    }
}

/// Dispatch a resource to the matching builder on `provider`.
pub async fn resolve_resource<P>(
    provider: &P,
    resource: &RemoteResource,
) -> Result<Option<String>, RemoteError>
where
    P: RemoteProvider + ?Sized,
{
    trace!(provider = provider.id(), kind = resource.kind(), "resolving");

    let url = match resource {
        RemoteResource::Branch { branch } => {
            Some(provider.url_for_branch(required("branch", branch)?))
        }
        RemoteResource::Branches => Some(provider.url_for_branches()),
        RemoteResource::Commit { sha } => Some(provider.url_for_commit(required("sha", sha)?)),
        RemoteResource::Comparison {
            base,
            compare,
            notation,
        } => provider.url_for_comparison(
            required("base", base)?,
            required("compare", compare)?,
            notation.unwrap_or_default(),
        ),
        RemoteResource::CreatePullRequest {
            base,
            head,
            title,
            description,
        } => {
            required("head branch", &head.branch)?;
            let options = PullRequestOptions {
                title: title.clone(),
                description: description.clone(),
            };
            provider
                .url_for_create_pull_request(base, head, &options)
                .await?
        }
        RemoteResource::File {
            file_name,
            branch_or_tag,
            range,
        } => Some(provider.url_for_file(
            required("file name", file_name)?,
            branch_or_tag.as_deref(),
            None,
            *range,
        )),
        RemoteResource::Repo => Some(provider.url_for_repository()),
        RemoteResource::Revision {
            file_name,
            branch_or_tag,
            sha,
            range,
        } => Some(provider.url_for_file(
            required("file name", file_name)?,
            branch_or_tag.as_deref(),
            sha.as_deref(),
            *range,
        )),
        // TODO: link tags once providers grow a url_for_tag builder
        RemoteResource::Tag { .. } => None,
    };

    Ok(url)
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, RemoteError> {
    if value.is_empty() {
        Err(RemoteError::InvalidResource(format!("{} is empty", field)))
    } else {
        Ok(value)
    }
}
