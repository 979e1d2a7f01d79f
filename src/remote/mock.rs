//! remote::mock
//!
//! Mock provider for deterministic testing.
//!
//! # Design
//!
//! `MockProvider` builds simple `/kind/value` links under
//! `https://mock.test/owner/repo`, records every resolution it performs and
//! can be told to fail specific lookups. Pull-request creation goes through an
//! async path so tests can exercise the lookup-then-build flow.
//!
//! # Example
//!
//! ```
//! use remotelink::remote::mock::MockProvider;
//! use remotelink::remote::{RemoteError, RemoteProvider, RemoteResource};
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new().fail_on_commit("dead", RemoteError::Lookup("gone".into()));
//!
//! let ok = provider.resolve(&RemoteResource::commit("beef")).await.unwrap();
//! assert_eq!(ok.as_deref(), Some("https://mock.test/owner/repo/commit/beef"));
//!
//! let err = provider.resolve(&RemoteResource::commit("dead")).await;
//! assert!(err.is_err());
//! assert_eq!(provider.commit_lookups(), vec!["beef", "dead"]);
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::encoding::{encode_component, encode_url};
use super::identity::ProviderIdentity;
use super::resource::{
    ComparisonNotation, LineRange, PullRequestBase, PullRequestHead, PullRequestOptions,
    RemoteResource,
};
use super::traits::{resolve_resource, RemoteError, RemoteProvider, ISSUE_NUMBER_TOKEN};

/// Mock provider for tests.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockProvider {
    identity: Arc<ProviderIdentity>,
    inner: Arc<Mutex<MockProviderInner>>,
}

#[derive(Debug, Default)]
struct MockProviderInner {
    /// Commit shas whose lookup fails, with the error to return.
    failing_commits: HashMap<String, RemoteError>,
    /// Error returned by PR-creation lookups, if any.
    pull_request_failure: Option<RemoteError>,
    supports_pull_requests: bool,
    cross_fork_ready: bool,
    commit_lookups: Vec<String>,
}

impl MockProvider {
    /// Provider for `mock.test/owner/repo` with PR creation enabled.
    pub fn new() -> Self {
        Self::with_identity(ProviderIdentity::new("mock.test", "owner/repo"))
    }

    pub fn with_identity(identity: ProviderIdentity) -> Self {
        Self {
            identity: Arc::new(identity),
            inner: Arc::new(Mutex::new(MockProviderInner {
                supports_pull_requests: true,
                cross_fork_ready: true,
                ..Default::default()
            })),
        }
    }

    /// Fail resolution of `Commit { sha }` with `error`.
    pub fn fail_on_commit(self, sha: impl Into<String>, error: RemoteError) -> Self {
        self.lock().failing_commits.insert(sha.into(), error);
        self
    }

    /// Fail every PR-creation lookup with `error`.
    pub fn fail_pull_requests(self, error: RemoteError) -> Self {
        self.lock().pull_request_failure = Some(error);
        self
    }

    /// Behave like a provider without PR creation.
    pub fn without_pull_requests(self) -> Self {
        self.lock().supports_pull_requests = false;
        self
    }

    pub fn cross_fork_ready(self, ready: bool) -> Self {
        self.lock().cross_fork_ready = ready;
        self
    }

    /// Commit shas passed to the commit builder, in call order.
    pub fn commit_lookups(&self) -> Vec<String> {
        self.lock().commit_lookups.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockProviderInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteProvider for MockProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    fn canonical_name(&self) -> &'static str {
        "Mock"
    }

    fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    fn issue_link_pattern(&self) -> String {
        format!("{}/issues/{}", self.base_url(), ISSUE_NUMBER_TOKEN)
    }

    fn url_for_branch(&self, branch: &str) -> String {
        format!("{}/branch/{}", self.base_url(), encode_url(branch))
    }

    fn url_for_branches(&self) -> String {
        format!("{}/branches", self.base_url())
    }

    fn url_for_commit(&self, sha: &str) -> String {
        self.lock().commit_lookups.push(sha.to_string());
        format!("{}/commit/{}", self.base_url(), sha)
    }

    fn url_for_comparison(
        &self,
        base: &str,
        head: &str,
        notation: ComparisonNotation,
    ) -> Option<String> {
        Some(format!(
            "{}/compare/{}{}{}",
            self.base_url(),
            encode_url(base),
            notation,
            encode_url(head)
        ))
    }

    fn url_for_file(
        &self,
        file_name: &str,
        branch: Option<&str>,
        sha: Option<&str>,
        range: Option<LineRange>,
    ) -> String {
        let rev = sha.or(branch).unwrap_or("HEAD");
        let line = range
            .map(|r| format!("#{}-{}", r.start, r.end))
            .unwrap_or_default();
        format!(
            "{}/file/{}/{}{}",
            self.base_url(),
            encode_url(rev),
            encode_url(file_name),
            line
        )
    }

    async fn url_for_create_pull_request(
        &self,
        base: &PullRequestBase,
        head: &PullRequestHead,
        options: &PullRequestOptions,
    ) -> Result<Option<String>, RemoteError> {
        // Yield once so the lookup is genuinely asynchronous.
        tokio::task::yield_now().await;

        let (supported, failure) = {
            let inner = self.lock();
            (inner.supports_pull_requests, inner.pull_request_failure.clone())
        };
        if let Some(error) = failure {
            return Err(error);
        }
        if !supported {
            return Ok(None);
        }

        let mut url = format!(
            "{}/pull/new?base={}&head={}",
            self.base_url(),
            encode_url(base.branch.as_deref().unwrap_or("HEAD")),
            encode_url(&head.branch)
        );
        if let Some(title) = &options.title {
            url.push_str("&title=");
            url.push_str(&encode_component(title));
        }
        Ok(Some(url))
    }

    async fn is_ready_for_cross_fork_pull_request_urls(&self) -> bool {
        self.lock().cross_fork_ready
    }

    // Commit lookups may fail, so resolve checks the failure table first.
    async fn resolve(&self, resource: &RemoteResource) -> Result<Option<String>, RemoteError> {
        if let RemoteResource::Commit { sha } = resource {
            let failure = self.lock().failing_commits.get(sha).cloned();
            if let Some(error) = failure {
                self.lock().commit_lookups.push(sha.clone());
                return Err(error);
            }
        }
        resolve_resource(self, resource).await
    }
}
