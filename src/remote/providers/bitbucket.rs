//! remote::providers::bitbucket
//!
//! Bitbucket Cloud link grammar.

use async_trait::async_trait;

use super::{query_string, with_query};
use crate::remote::encoding::encode_url;
use crate::remote::identity::ProviderIdentity;
use crate::remote::resource::{
    ComparisonNotation, LineRange, PullRequestBase, PullRequestHead, PullRequestOptions,
};
use crate::remote::traits::{RemoteError, RemoteProvider, ISSUE_NUMBER_TOKEN};

/// Bitbucket Cloud provider.
#[derive(Debug, Clone)]
pub struct BitbucketProvider {
    identity: ProviderIdentity,
}

impl BitbucketProvider {
    pub fn new(identity: ProviderIdentity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl RemoteProvider for BitbucketProvider {
    fn id(&self) -> &'static str {
        "bitbucket"
    }

    fn canonical_name(&self) -> &'static str {
        "Bitbucket"
    }

    fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    fn issue_link_pattern(&self) -> String {
        format!(
            "{}/issues/{}",
            encode_url(&self.base_url()),
            ISSUE_NUMBER_TOKEN
        )
    }

    fn url_for_branch(&self, branch: &str) -> String {
        encode_url(&format!("{}/branch/{}", self.base_url(), branch))
    }

    fn url_for_branches(&self) -> String {
        encode_url(&format!("{}/branches", self.base_url()))
    }

    fn url_for_commit(&self, sha: &str) -> String {
        encode_url(&format!("{}/commits/{}", self.base_url(), sha))
    }

    /// Bitbucket compares head against base with a CR separator and has no
    /// notion of two- versus three-dot.
    fn url_for_comparison(
        &self,
        base: &str,
        head: &str,
        _notation: ComparisonNotation,
    ) -> Option<String> {
        Some(encode_url(&format!(
            "{}/branches/compare/{}\r{}",
            self.base_url(),
            head,
            base
        )))
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
            Some(r) if r.is_single_line() => format!("#lines-{}", r.start),
            Some(r) => format!("#lines-{}:{}", r.start, r.end),
        };
        let rev = sha.or(branch).unwrap_or("HEAD");
        format!(
            "{}{}",
            encode_url(&format!("{}/src/{}/{}", self.base_url(), rev, file_name)),
            line
        )
    }

    async fn url_for_create_pull_request(
        &self,
        base: &PullRequestBase,
        head: &PullRequestHead,
        options: &PullRequestOptions,
    ) -> Result<Option<String>, RemoteError> {
        let dest = match (&base.branch, base.remote.path == head.remote.path) {
            (Some(branch), true) => Some(branch.clone()),
            (Some(branch), false) => Some(format!("{}::{}", base.remote.path, branch)),
            (None, true) => None,
            (None, false) => Some(base.remote.path.clone()),
        };

        let url = encode_url(&format!(
            "{}/pull-requests/new",
            self.identity.repo_base_url(&head.remote.path)
        ));
        let query = query_string(&[
            ("source", Some(head.branch.as_str())),
            ("dest", dest.as_deref()),
            ("title", options.title.as_deref()),
            ("description", options.description.as_deref()),
        ]);

        Ok(Some(with_query(url, &query)))
    }
}
