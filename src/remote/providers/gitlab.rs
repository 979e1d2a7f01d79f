//! remote::providers::gitlab
//!
//! GitLab (gitlab.com and self-managed) link grammar.
//!
//! GitLab addresses fork targets by numeric project id, which needs an API
//! lookup this crate does not perform. Merge-request links therefore always
//! open against the head project and the provider reports that it is not
//! ready for cross-fork links.

use async_trait::async_trait;

use super::{query_string, with_query};
use crate::remote::encoding::encode_url;
use crate::remote::identity::ProviderIdentity;
use crate::remote::resource::{
    ComparisonNotation, LineRange, PullRequestBase, PullRequestHead, PullRequestOptions,
};
use crate::remote::traits::{RemoteError, RemoteProvider, ISSUE_NUMBER_TOKEN};

/// GitLab provider.
#[derive(Debug, Clone)]
pub struct GitLabProvider {
    identity: ProviderIdentity,
}

impl GitLabProvider {
    pub fn new(identity: ProviderIdentity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl RemoteProvider for GitLabProvider {
    fn id(&self) -> &'static str {
        "gitlab"
    }

    fn canonical_name(&self) -> &'static str {
        "GitLab"
    }

    fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    fn issue_link_pattern(&self) -> String {
        format!(
            "{}/-/issues/{}",
            encode_url(&self.base_url()),
            ISSUE_NUMBER_TOKEN
        )
    }

    fn url_for_branch(&self, branch: &str) -> String {
        encode_url(&format!("{}/-/tree/{}", self.base_url(), branch))
    }

    fn url_for_branches(&self) -> String {
        encode_url(&format!("{}/-/branches", self.base_url()))
    }

    fn url_for_commit(&self, sha: &str) -> String {
        encode_url(&format!("{}/-/commit/{}", self.base_url(), sha))
    }

    fn url_for_comparison(
        &self,
        base: &str,
        head: &str,
        notation: ComparisonNotation,
    ) -> Option<String> {
        Some(encode_url(&format!(
            "{}/-/compare/{}{}{}",
            self.base_url(),
            base,
            notation,
            head
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
            Some(r) if r.is_single_line() => format!("#L{}", r.start),
            Some(r) => format!("#L{}-{}", r.start, r.end),
        };
        let url = match sha.or(branch) {
            Some(rev) => format!("{}/-/blob/{}/{}", self.base_url(), rev, file_name),
            None => format!("{}?path={}", self.base_url(), file_name),
        };
        format!("{}{}", encode_url(&url), line)
    }

    async fn url_for_create_pull_request(
        &self,
        base: &PullRequestBase,
        head: &PullRequestHead,
        options: &PullRequestOptions,
    ) -> Result<Option<String>, RemoteError> {
        let url = encode_url(&format!(
            "{}/-/merge_requests/new",
            self.identity.repo_base_url(&head.remote.path)
        ));
        let query = query_string(&[
            ("merge_request[source_branch]", Some(head.branch.as_str())),
            ("merge_request[target_branch]", base.branch.as_deref()),
            ("merge_request[title]", options.title.as_deref()),
            ("merge_request[description]", options.description.as_deref()),
        ]);

        Ok(Some(with_query(url, &query)))
    }

    async fn is_ready_for_cross_fork_pull_request_urls(&self) -> bool {
        false
    }
}
