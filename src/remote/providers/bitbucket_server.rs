//! remote::providers::bitbucket_server
//!
//! Bitbucket Server / Data Center link grammar.
//!
//! Repositories live under `/projects/<KEY>/repos/<slug>` rather than at the
//! clone path, so this provider overrides the base URL. Project keys are
//! upper case on the server even when clone URLs spell them in lower case.

use async_trait::async_trait;

use super::{query_string, with_query};
use crate::remote::encoding::encode_url;
use crate::remote::identity::ProviderIdentity;
use crate::remote::resource::{
    ComparisonNotation, LineRange, PullRequestBase, PullRequestHead, PullRequestOptions,
};
use crate::remote::traits::{RemoteError, RemoteProvider, ISSUE_NUMBER_TOKEN};

/// Bitbucket Server provider.
#[derive(Debug, Clone)]
pub struct BitbucketServerProvider {
    identity: ProviderIdentity,
}

impl BitbucketServerProvider {
    pub fn new(identity: ProviderIdentity) -> Self {
        Self { identity }
    }

    fn repo_url(&self, path: &str) -> String {
        let (project, repo) = path.split_once('/').unwrap_or(("", path));
        format!(
            "{}://{}/projects/{}/repos/{}",
            self.identity.protocol(),
            self.identity.domain(),
            project.to_uppercase(),
            repo
        )
    }
}

#[async_trait]
impl RemoteProvider for BitbucketServerProvider {
    fn id(&self) -> &'static str {
        "bitbucket-server"
    }

    fn canonical_name(&self) -> &'static str {
        "Bitbucket Server"
    }

    fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    fn base_url(&self) -> String {
        self.repo_url(self.identity.path())
    }

    fn issue_link_pattern(&self) -> String {
        format!(
            "{}/issues/{}",
            encode_url(&self.base_url()),
            ISSUE_NUMBER_TOKEN
        )
    }

    fn url_for_branch(&self, branch: &str) -> String {
        let url = encode_url(&format!("{}/commits", self.base_url()));
        with_query(url, &query_string(&[("until", Some(branch))]))
    }

    fn url_for_branches(&self) -> String {
        encode_url(&format!("{}/branches", self.base_url()))
    }

    fn url_for_commit(&self, sha: &str) -> String {
        encode_url(&format!("{}/commits/{}", self.base_url(), sha))
    }

    fn url_for_comparison(
        &self,
        base: &str,
        head: &str,
        _notation: ComparisonNotation,
    ) -> Option<String> {
        let url = encode_url(&format!("{}/compare/commits", self.base_url()));
        Some(with_query(
            url,
            &query_string(&[("sourceBranch", Some(head)), ("targetBranch", Some(base))]),
        ))
    }

    fn url_for_file(
        &self,
        file_name: &str,
        branch: Option<&str>,
        sha: Option<&str>,
        range: Option<LineRange>,
    ) -> String {
        let line = match range {
            None => String::new(),
            Some(r) if r.is_single_line() => format!("#{}", r.start),
            Some(r) => format!("#{}-{}", r.start, r.end),
        };
        let url = encode_url(&format!("{}/browse/{}", self.base_url(), file_name));
        let url = with_query(url, &query_string(&[("at", sha.or(branch))]));
        format!("{}{}", url, line)
    }

    async fn url_for_create_pull_request(
        &self,
        base: &PullRequestBase,
        head: &PullRequestHead,
        _options: &PullRequestOptions,
    ) -> Result<Option<String>, RemoteError> {
        let url = format!("{}/pull-requests?create", self.repo_url(&head.remote.path));
        let query = query_string(&[
            ("sourceBranch", Some(head.branch.as_str())),
            ("targetBranch", base.branch.as_deref()),
        ]);

        Ok(Some(with_query(encode_url(&url), &query)))
    }
}
