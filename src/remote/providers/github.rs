//! remote::providers::github
//!
//! GitHub (github.com and GitHub Enterprise) link grammar.

use async_trait::async_trait;

use super::{path_owner, query_string, with_query};
use crate::remote::encoding::encode_url;
use crate::remote::identity::ProviderIdentity;
use crate::remote::resource::{
    ComparisonNotation, LineRange, PullRequestBase, PullRequestHead, PullRequestOptions,
};
use crate::remote::traits::{RemoteError, RemoteProvider, ISSUE_NUMBER_TOKEN};

/// GitHub provider.
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    identity: ProviderIdentity,
}

impl GitHubProvider {
    pub fn new(identity: ProviderIdentity) -> Self {
        Self { identity }
    }
}

fn line_fragment(range: Option<LineRange>) -> String {
    match range {
        None => String::new(),
        Some(r) if r.is_single_line() => format!("#L{}", r.start),
        Some(r) => format!("#L{}-L{}", r.start, r.end),
    }
}

#[async_trait]
impl RemoteProvider for GitHubProvider {
    fn id(&self) -> &'static str {
        "github"
    }

    fn canonical_name(&self) -> &'static str {
        "GitHub"
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
        encode_url(&format!("{}/commits/{}", self.base_url(), branch))
    }

    fn url_for_branches(&self) -> String {
        encode_url(&format!("{}/branches", self.base_url()))
    }

    fn url_for_commit(&self, sha: &str) -> String {
        encode_url(&format!("{}/commit/{}", self.base_url(), sha))
    }

    fn url_for_comparison(
        &self,
        base: &str,
        head: &str,
        notation: ComparisonNotation,
    ) -> Option<String> {
        Some(encode_url(&format!(
            "{}/compare/{}{}{}",
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
        let line = line_fragment(range);
        let url = match sha.or(branch) {
            Some(rev) => format!("{}/blob/{}/{}", self.base_url(), rev, file_name),
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
        let head_ref = if base.remote.path == head.remote.path {
            head.branch.clone()
        } else {
            format!("{}:{}", path_owner(&head.remote.path), head.branch)
        };
        let range = match &base.branch {
            Some(base_branch) => format!("{}...{}", base_branch, head_ref),
            None => head_ref,
        };

        let url = encode_url(&format!(
            "{}/compare/{}",
            self.identity.repo_base_url(&base.remote.path),
            range
        ));
        let query = query_string(&[
            ("expand", Some("1")),
            ("title", options.title.as_deref()),
            ("body", options.description.as_deref()),
        ]);

        Ok(Some(with_query(url, &query)))
    }
}
