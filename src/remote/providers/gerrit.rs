//! remote::providers::gerrit
//!
//! Gerrit code review with the gitiles repository browser.
//!
//! Two deployments share one grammar and differ only in where gitiles and
//! the review UI live:
//!
//! | Flavor         | gitiles                              | review                        |
//! |----------------|--------------------------------------|-------------------------------|
//! | `Gerrit`       | `<host>/plugins/gitiles/<path>`      | `<host>`                      |
//! | `GoogleSource` | `<name>.googlesource.com/<path>`     | `<name>-review.googlesource.com` |
//!
//! Gerrit has no web page for creating a change, so PR-creation links keep
//! the trait default and resolve to nothing.

use async_trait::async_trait;

use crate::remote::encoding::encode_url;
use crate::remote::identity::ProviderIdentity;
use crate::remote::resource::{ComparisonNotation, LineRange};
use crate::remote::traits::{RemoteProvider, ISSUE_NUMBER_TOKEN};

/// Which Gerrit deployment a provider links into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GerritFlavor {
    /// Self-hosted Gerrit with the gitiles plugin.
    Gerrit,
    /// Google-hosted `*.googlesource.com`.
    GoogleSource,
}

/// Gerrit provider.
#[derive(Debug, Clone)]
pub struct GerritProvider {
    identity: ProviderIdentity,
    flavor: GerritFlavor,
}

impl GerritProvider {
    pub fn new(identity: ProviderIdentity, flavor: GerritFlavor) -> Self {
        Self { identity, flavor }
    }

    pub fn flavor(&self) -> GerritFlavor {
        self.flavor
    }

    /// Root of the review UI.
    pub fn review_url(&self) -> String {
        let domain = self.identity.domain();
        let host = match self.flavor {
            GerritFlavor::Gerrit => domain.to_string(),
            GerritFlavor::GoogleSource => match domain.split_once('.') {
                Some((name, rest)) if !name.ends_with("-review") => {
                    format!("{}-review.{}", name, rest)
                }
                _ => domain.to_string(),
            },
        };
        format!("{}://{}", self.identity.protocol(), host)
    }
}

#[async_trait]
impl RemoteProvider for GerritProvider {
    fn id(&self) -> &'static str {
        match self.flavor {
            GerritFlavor::Gerrit => "gerrit",
            GerritFlavor::GoogleSource => "google-source",
        }
    }

    fn canonical_name(&self) -> &'static str {
        match self.flavor {
            GerritFlavor::Gerrit => "Gerrit",
            GerritFlavor::GoogleSource => "Google Source",
        }
    }

    fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    fn base_url(&self) -> String {
        match self.flavor {
            GerritFlavor::Gerrit => self
                .identity
                .repo_base_url(&format!("plugins/gitiles/{}", self.identity.path())),
            GerritFlavor::GoogleSource => self.identity.base_url(),
        }
    }

    fn issue_link_pattern(&self) -> String {
        format!("{}/q/{}", self.review_url(), ISSUE_NUMBER_TOKEN)
    }

    fn url_for_branch(&self, branch: &str) -> String {
        encode_url(&format!("{}/+/refs/heads/{}", self.base_url(), branch))
    }

    fn url_for_branches(&self) -> String {
        encode_url(&format!("{}/+refs", self.base_url()))
    }

    fn url_for_commit(&self, sha: &str) -> String {
        encode_url(&format!("{}/+/{}^!", self.base_url(), sha))
    }

    /// gitiles only renders two-dot logs.
    fn url_for_comparison(
        &self,
        base: &str,
        head: &str,
        _notation: ComparisonNotation,
    ) -> Option<String> {
        Some(encode_url(&format!(
            "{}/+/{}..{}",
            self.base_url(),
            base,
            head
        )))
    }

    /// gitiles anchors a single line; ranges link to their first line.
    fn url_for_file(
        &self,
        file_name: &str,
        branch: Option<&str>,
        sha: Option<&str>,
        range: Option<LineRange>,
    ) -> String {
        let line = range.map(|r| format!("#{}", r.start)).unwrap_or_default();
        let rev = match (sha, branch) {
            (Some(sha), _) => sha.to_string(),
            (None, Some(branch)) => format!("refs/heads/{}", branch),
            (None, None) => "HEAD".to_string(),
        };
        format!(
            "{}{}",
            encode_url(&format!("{}/+/{}/{}", self.base_url(), rev, file_name)),
            line
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::resource::RemoteResource;

    fn gerrit() -> GerritProvider {
        GerritProvider::new(
            ProviderIdentity::new("review.example.org", "tools/build"),
            GerritFlavor::Gerrit,
        )
    }

    fn googlesource() -> GerritProvider {
        GerritProvider::new(
            ProviderIdentity::new("chromium.googlesource.com", "chromium/src"),
            GerritFlavor::GoogleSource,
        )
    }

    mod gerrit_flavor {
        use super::*;

        #[test]
        fn gitiles_under_plugin_path() {
            assert_eq!(
                gerrit().base_url(),
                "https://review.example.org/plugins/gitiles/tools/build"
            );
            assert_eq!(gerrit().review_url(), "https://review.example.org");
        }

        #[test]
        fn commit_and_branch() {
            let p = gerrit();
            assert_eq!(
                p.url_for_commit("abc"),
                "https://review.example.org/plugins/gitiles/tools/build/+/abc%5E!"
            );
            assert_eq!(
                p.url_for_branch("main"),
                "https://review.example.org/plugins/gitiles/tools/build/+/refs/heads/main"
            );
            assert_eq!(
                p.url_for_branches(),
                "https://review.example.org/plugins/gitiles/tools/build/+refs"
            );
        }

        #[test]
        fn ids() {
            assert_eq!(gerrit().id(), "gerrit");
            assert_eq!(gerrit().canonical_name(), "Gerrit");
        }
    }

    mod google_source {
        use super::*;

        #[test]
        fn review_host() {
            assert_eq!(
                googlesource().review_url(),
                "https://chromium-review.googlesource.com"
            );
            assert_eq!(
                googlesource().issue_link_pattern(),
                "https://chromium-review.googlesource.com/q/<num>"
            );
        }

        #[test]
        fn file_on_branch_with_range() {
            assert_eq!(
                googlesource().url_for_file("BUILD.gn", Some("main"), None, Some(LineRange::new(10, 20))),
                "https://chromium.googlesource.com/chromium/src/+/refs/heads/main/BUILD.gn#10"
            );
        }

        #[test]
        fn ids() {
            assert_eq!(googlesource().id(), "google-source");
            assert_eq!(googlesource().display_name(), "Google Source");
        }
    }

    #[test]
    fn comparison_is_always_two_dot() {
        assert_eq!(
            googlesource()
                .url_for_comparison("v1", "v2", ComparisonNotation::ThreeDot)
                .as_deref(),
            Some("https://chromium.googlesource.com/chromium/src/+/v1..v2")
        );
    }

    #[test]
    fn file_without_revision_uses_head() {
        assert_eq!(
            gerrit().url_for_file("README", None, None, None),
            "https://review.example.org/plugins/gitiles/tools/build/+/HEAD/README"
        );
    }

    #[tokio::test]
    async fn no_pull_request_links() {
        use crate::remote::resource::{PullRequestBase, PullRequestHead, RemoteRef};

        let remote = RemoteRef {
            path: "tools/build".into(),
            url: "https://review.example.org/tools/build".into(),
        };
        let url = gerrit()
            .resolve(&RemoteResource::CreatePullRequest {
                base: PullRequestBase {
                    branch: Some("main".into()),
                    remote: remote.clone(),
                },
                head: PullRequestHead {
                    branch: "topic".into(),
                    remote,
                },
                title: None,
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(url, None);
    }
}
