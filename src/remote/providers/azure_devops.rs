//! remote::providers::azure_devops
//!
//! Azure DevOps (Azure Repos) link grammar.
//!
//! Repository paths have the form `org/project/_git/repo`. Clone URLs come
//! in several shapes; [`AzureDevOpsProvider::normalize`] folds them into
//! that form before an identity is built.

use async_trait::async_trait;

use super::{query_string, with_query};
use crate::remote::encoding::encode_url;
use crate::remote::identity::ProviderIdentity;
use crate::remote::resource::{
    ComparisonNotation, LineRange, PullRequestBase, PullRequestHead, PullRequestOptions,
};
use crate::remote::traits::{RemoteError, RemoteProvider, ISSUE_NUMBER_TOKEN};

const SSH_HOST: &str = "ssh.dev.azure.com";
const WEB_HOST: &str = "dev.azure.com";

/// Azure DevOps provider.
#[derive(Debug, Clone)]
pub struct AzureDevOpsProvider {
    identity: ProviderIdentity,
}

impl AzureDevOpsProvider {
    pub fn new(identity: ProviderIdentity) -> Self {
        Self { identity }
    }

    /// Map a parsed clone `(domain, path)` to the web `(domain, path)`.
    ///
    /// - `ssh.dev.azure.com` + `v3/org/project/repo` → `dev.azure.com` + `org/project/_git/repo`
    /// - `vs-ssh.visualstudio.com` + `v3/org/project/repo` → `org.visualstudio.com` + `project/_git/repo`
    /// - `org@dev.azure.com` style HTTPS paths are already in web form
    pub fn normalize(domain: &str, path: &str) -> (String, String) {
        let ssh_parts: Option<Vec<&str>> = path
            .strip_prefix("v3/")
            .map(|rest| rest.splitn(3, '/').collect());

        match ssh_parts {
            Some(parts) if parts.len() == 3 && domain == SSH_HOST => (
                WEB_HOST.to_string(),
                format!("{}/{}/_git/{}", parts[0], parts[1], parts[2]),
            ),
            Some(parts) if parts.len() == 3 && domain.ends_with("visualstudio.com") => (
                format!("{}.visualstudio.com", parts[0]),
                format!("{}/_git/{}", parts[1], parts[2]),
            ),
            _ => (domain.to_string(), path.to_string()),
        }
    }

    fn version(branch: Option<&str>, sha: Option<&str>) -> Option<String> {
        match (sha, branch) {
            (Some(sha), _) => Some(format!("GC{}", sha)),
            (None, Some(branch)) => Some(format!("GB{}", branch)),
            (None, None) => None,
        }
    }
}

#[async_trait]
impl RemoteProvider for AzureDevOpsProvider {
    fn id(&self) -> &'static str {
        "azure-devops"
    }

    fn canonical_name(&self) -> &'static str {
        "Azure DevOps"
    }

    fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    fn issue_link_pattern(&self) -> String {
        format!(
            "{}://{}/{}/_workitems/edit/{}",
            self.identity.protocol(),
            self.identity.domain(),
            encode_url(self.owner()),
            ISSUE_NUMBER_TOKEN
        )
    }

    fn url_for_branch(&self, branch: &str) -> String {
        let version = format!("GB{}", branch);
        with_query(
            encode_url(&self.base_url()),
            &query_string(&[("version", Some(version.as_str())), ("_a", Some("history"))]),
        )
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
        _notation: ComparisonNotation,
    ) -> Option<String> {
        let base_version = format!("GB{}", base);
        let target_version = format!("GB{}", head);
        Some(with_query(
            encode_url(&format!("{}/branchCompare", self.base_url())),
            &query_string(&[
                ("baseVersion", Some(base_version.as_str())),
                ("targetVersion", Some(target_version.as_str())),
            ]),
        ))
    }

    fn url_for_file(
        &self,
        file_name: &str,
        branch: Option<&str>,
        sha: Option<&str>,
        range: Option<LineRange>,
    ) -> String {
        let path = format!("/{}", file_name);
        let version = Self::version(branch, sha);
        let (start, end) = match range {
            Some(r) if r.is_single_line() => (Some(r.start.to_string()), None),
            Some(r) => (Some(r.start.to_string()), Some(r.end.to_string())),
            None => (None, None),
        };
        let column = start.as_ref().map(|_| "1");

        with_query(
            encode_url(&self.base_url()),
            &query_string(&[
                ("path", Some(path.as_str())),
                ("version", version.as_deref()),
                ("line", start.as_deref()),
                ("lineEnd", end.as_deref()),
                ("lineStartColumn", column),
                ("lineEndColumn", column),
            ]),
        )
    }

    async fn url_for_create_pull_request(
        &self,
        base: &PullRequestBase,
        head: &PullRequestHead,
        _options: &PullRequestOptions,
    ) -> Result<Option<String>, RemoteError> {
        Ok(Some(with_query(
            encode_url(&format!("{}/pullrequestcreate", self.base_url())),
            &query_string(&[
                ("sourceRef", Some(head.branch.as_str())),
                ("targetRef", base.branch.as_deref()),
            ]),
        )))
    }

    async fn is_ready_for_cross_fork_pull_request_urls(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn azure() -> AzureDevOpsProvider {
        AzureDevOpsProvider::new(ProviderIdentity::new("dev.azure.com", "org/project/_git/repo"))
    }

    mod normalize {
        use super::*;

        #[test]
        fn ssh_v3() {
            assert_eq!(
                AzureDevOpsProvider::normalize("ssh.dev.azure.com", "v3/org/project/repo"),
                ("dev.azure.com".to_string(), "org/project/_git/repo".to_string())
            );
        }

        #[test]
        fn visualstudio_ssh() {
            assert_eq!(
                AzureDevOpsProvider::normalize("vs-ssh.visualstudio.com", "v3/org/project/repo"),
                (
                    "org.visualstudio.com".to_string(),
                    "project/_git/repo".to_string()
                )
            );
        }

        #[test]
        fn https_unchanged() {
            assert_eq!(
                AzureDevOpsProvider::normalize("dev.azure.com", "org/project/_git/repo"),
                ("dev.azure.com".to_string(), "org/project/_git/repo".to_string())
            );
        }
    }

    #[test]
    fn branch_history() {
        assert_eq!(
            azure().url_for_branch("main"),
            "https://dev.azure.com/org/project/_git/repo?version=GBmain&_a=history"
        );
    }

    #[test]
    fn comparison() {
        assert_eq!(
            azure()
                .url_for_comparison("main", "dev", ComparisonNotation::ThreeDot)
                .as_deref(),
            Some("https://dev.azure.com/org/project/_git/repo/branchCompare?baseVersion=GBmain&targetVersion=GBdev")
        );
    }

    #[test]
    fn file_with_commit_and_range() {
        assert_eq!(
            azure().url_for_file("src/app.ts", Some("main"), Some("abc"), Some(LineRange::new(4, 8))),
            "https://dev.azure.com/org/project/_git/repo?path=%2Fsrc%2Fapp.ts&version=GCabc&line=4&lineEnd=8&lineStartColumn=1&lineEndColumn=1"
        );
    }

    #[test]
    fn file_without_revision() {
        assert_eq!(
            azure().url_for_file("README.md", None, None, None),
            "https://dev.azure.com/org/project/_git/repo?path=%2FREADME.md"
        );
    }

    #[test]
    fn work_item_pattern() {
        assert_eq!(
            azure().issue_link_pattern(),
            "https://dev.azure.com/org/_workitems/edit/<num>"
        );
    }

    #[tokio::test]
    async fn not_ready_for_cross_fork() {
        assert!(!azure().is_ready_for_cross_fork_pull_request_urls().await);
    }
}
