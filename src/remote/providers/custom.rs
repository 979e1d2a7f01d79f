//! remote::providers::custom
//!
//! User-configured link templates for hosts no built-in provider knows.
//!
//! Templates are complete URLs with `${token}` placeholders:
//!
//! | Template              | Tokens                                       |
//! |-----------------------|----------------------------------------------|
//! | `repository`          | `${repo}`                                    |
//! | `branches`            | `${repo}`                                    |
//! | `branch`              | `${repo}` `${branch}`                        |
//! | `commit`              | `${repo}` `${id}`                            |
//! | `file`                | `${repo}` `${file}` `${line}`                |
//! | `file_in_branch`      | as `file`, plus `${branch}`                  |
//! | `file_in_commit`      | as `file`, plus `${id}`                      |
//! | `file_line`           | `${line}`                                    |
//! | `file_range`          | `${start}` `${end}`                          |
//! | `comparison`          | `${repo}` `${ref1}` `${ref2}` `${notation}`  |
//! | `create_pull_request` | `${repo}` `${base}` `${head}`                |
//! | `issue`               | `${repo}` `${id}`                            |
//!
//! Substituted values are encoded; template text is used as written. The
//! `${line}` token expands to the rendered `file_line` / `file_range`
//! template and is appended to the file link when the template omits it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::remote::encoding::encode_url;
use crate::remote::identity::ProviderIdentity;
use crate::remote::resource::{
    ComparisonNotation, LineRange, PullRequestBase, PullRequestHead, PullRequestOptions,
    RemoteResource,
};
use crate::remote::traits::{resolve_resource, RemoteError, RemoteProvider, ISSUE_NUMBER_TOKEN};

const LINE_TOKEN: &str = "${line}";

/// URL templates for a custom remote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomUrlTemplates {
    pub repository: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<String>,
    pub branch: String,
    pub commit: String,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_in_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_in_commit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_pull_request: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
}

impl CustomUrlTemplates {
    /// Names of required templates that are empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("repository", &self.repository),
            ("branch", &self.branch),
            ("commit", &self.commit),
            ("file", &self.file),
        ]
        .into_iter()
        .filter(|(_, template)| template.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Replace each `${key}` in `template` with its value.
///
/// Unknown tokens are left in place.
fn interpolate(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("${{{}}}", key), value)
    })
}

/// Provider driven entirely by [`CustomUrlTemplates`].
#[derive(Debug, Clone)]
pub struct CustomProvider {
    identity: ProviderIdentity,
    templates: CustomUrlTemplates,
}

impl CustomProvider {
    pub fn new(identity: ProviderIdentity, templates: CustomUrlTemplates) -> Self {
        Self {
            identity,
            templates,
        }
    }

    pub fn templates(&self) -> &CustomUrlTemplates {
        &self.templates
    }

    fn repo(&self) -> String {
        encode_url(self.identity.path())
    }

    fn line_fragment(&self, range: Option<LineRange>) -> String {
        match range {
            None => String::new(),
            Some(r) if r.is_single_line() => self
                .templates
                .file_line
                .as_deref()
                .map(|t| interpolate(t, &[("line", &r.start.to_string())]))
                .unwrap_or_default(),
            Some(r) => self
                .templates
                .file_range
                .as_deref()
                .map(|t| {
                    interpolate(
                        t,
                        &[("start", &r.start.to_string()), ("end", &r.end.to_string())],
                    )
                })
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl RemoteProvider for CustomProvider {
    fn id(&self) -> &'static str {
        "custom"
    }

    fn canonical_name(&self) -> &'static str {
        "Custom"
    }

    fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    fn base_url(&self) -> String {
        interpolate(&self.templates.repository, &[("repo", &self.repo())])
    }

    /// The repository template is filled with encoded values already.
    fn url_for_repository(&self) -> String {
        self.base_url()
    }

    fn issue_link_pattern(&self) -> String {
        match &self.templates.issue {
            Some(template) => interpolate(
                template,
                &[("repo", &self.repo()), ("id", ISSUE_NUMBER_TOKEN)],
            ),
            None => format!("{}/issues/{}", self.base_url(), ISSUE_NUMBER_TOKEN),
        }
    }

    fn url_for_branch(&self, branch: &str) -> String {
        interpolate(
            &self.templates.branch,
            &[("repo", &self.repo()), ("branch", &encode_url(branch))],
        )
    }

    /// Falls back to the repository link; [`resolve`](Self::resolve) reports
    /// the resource as unlinkable when no `branches` template exists.
    fn url_for_branches(&self) -> String {
        match &self.templates.branches {
            Some(template) => interpolate(template, &[("repo", &self.repo())]),
            None => self.base_url(),
        }
    }

    fn url_for_commit(&self, sha: &str) -> String {
        interpolate(
            &self.templates.commit,
            &[("repo", &self.repo()), ("id", &encode_url(sha))],
        )
    }

    fn url_for_comparison(
        &self,
        base: &str,
        head: &str,
        notation: ComparisonNotation,
    ) -> Option<String> {
        let template = self.templates.comparison.as_deref()?;
        Some(interpolate(
            template,
            &[
                ("repo", &self.repo()),
                ("ref1", &encode_url(base)),
                ("ref2", &encode_url(head)),
                ("notation", notation.as_str()),
            ],
        ))
    }

    fn url_for_file(
        &self,
        file_name: &str,
        branch: Option<&str>,
        sha: Option<&str>,
        range: Option<LineRange>,
    ) -> String {
        let template = match (sha, branch) {
            (Some(_), _) => self.templates.file_in_commit.as_deref(),
            (None, Some(_)) => self.templates.file_in_branch.as_deref(),
            (None, None) => None,
        }
        .unwrap_or(self.templates.file.as_str());

        let line = self.line_fragment(range);
        let url = interpolate(
            template,
            &[
                ("repo", &self.repo()),
                ("file", &encode_url(file_name)),
                ("branch", &encode_url(branch.unwrap_or_default())),
                ("id", &encode_url(sha.unwrap_or_default())),
            ],
        );

        if url.contains(LINE_TOKEN) {
            url.replace(LINE_TOKEN, &line)
        } else {
            format!("{}{}", url, line)
        }
    }

    async fn url_for_create_pull_request(
        &self,
        base: &PullRequestBase,
        head: &PullRequestHead,
        _options: &PullRequestOptions,
    ) -> Result<Option<String>, RemoteError> {
        let Some(template) = self.templates.create_pull_request.as_deref() else {
            return Ok(None);
        };
        Ok(Some(interpolate(
            template,
            &[
                ("repo", &self.repo()),
                ("base", &encode_url(base.branch.as_deref().unwrap_or_default())),
                ("head", &encode_url(&head.branch)),
            ],
        )))
    }

    async fn resolve(&self, resource: &RemoteResource) -> Result<Option<String>, RemoteError> {
        if matches!(resource, RemoteResource::Branches) && self.templates.branches.is_none() {
            return Ok(None);
        }
        resolve_resource(self, resource).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::resource::RemoteRef;

    fn templates() -> CustomUrlTemplates {
        CustomUrlTemplates {
            repository: "https://code.internal/${repo}".into(),
            branch: "https://code.internal/${repo}/tree/${branch}".into(),
            commit: "https://code.internal/${repo}/c/${id}".into(),
            file: "https://code.internal/${repo}/raw/${file}${line}".into(),
            file_in_branch: Some("https://code.internal/${repo}/tree/${branch}/${file}${line}".into()),
            file_line: Some("#L${line}".into()),
            file_range: Some("#L${start}-${end}".into()),
            ..Default::default()
        }
    }

    fn custom() -> CustomProvider {
        CustomProvider::new(
            ProviderIdentity::builder("code.internal", "team/app")
                .custom(true)
                .build(),
            templates(),
        )
    }

    #[test]
    fn interpolate_replaces_known_tokens() {
        assert_eq!(
            interpolate("${a}/${b}/${c}", &[("a", "1"), ("b", "2")]),
            "1/2/${c}"
        );
    }

    #[test]
    fn missing_required_templates() {
        let mut t = templates();
        assert!(t.missing_required().is_empty());
        t.commit.clear();
        t.file = "  ".into();
        assert_eq!(t.missing_required(), vec!["commit", "file"]);
    }

    #[test]
    fn repository_and_commit() {
        let p = custom();
        assert_eq!(p.url_for_repository(), "https://code.internal/team/app");
        assert_eq!(p.url_for_commit("abc"), "https://code.internal/team/app/c/abc");
    }

    #[test]
    fn branch_value_is_encoded() {
        assert_eq!(
            custom().url_for_branch("fix/#12"),
            "https://code.internal/team/app/tree/fix/%2312"
        );
    }

    mod file {
        use super::*;

        #[test]
        fn branch_template_with_range() {
            assert_eq!(
                custom().url_for_file("a b.txt", Some("dev"), None, Some(LineRange::new(2, 9))),
                "https://code.internal/team/app/tree/dev/a%20b.txt#L2-9"
            );
        }

        #[test]
        fn commit_falls_back_to_file_template() {
            assert_eq!(
                custom().url_for_file("x.rs", None, Some("abc"), Some(LineRange::line(3))),
                "https://code.internal/team/app/raw/x.rs#L3"
            );
        }

        #[test]
        fn line_appended_when_template_lacks_token() {
            let mut t = templates();
            t.file = "https://code.internal/${repo}/raw/${file}".into();
            let p = CustomProvider::new(ProviderIdentity::new("code.internal", "team/app"), t);
            assert_eq!(
                p.url_for_file("x.rs", None, None, Some(LineRange::line(3))),
                "https://code.internal/team/app/raw/x.rs#L3"
            );
        }
    }

    mod optional_templates {
        use super::*;

        #[tokio::test]
        async fn branches_absent() {
            assert_eq!(custom().resolve(&RemoteResource::Branches).await.unwrap(), None);
        }

        #[tokio::test]
        async fn comparison_absent() {
            let url = custom()
                .resolve(&RemoteResource::comparison("a", "b"))
                .await
                .unwrap();
            assert_eq!(url, None);
        }

        #[tokio::test]
        async fn pull_request_absent_then_present() {
            let remote = RemoteRef {
                path: "team/app".into(),
                url: "https://code.internal/team/app".into(),
            };
            let resource = RemoteResource::CreatePullRequest {
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
            };
            assert_eq!(custom().resolve(&resource).await.unwrap(), None);

            let mut t = templates();
            t.create_pull_request = Some("https://code.internal/${repo}/pr/${base}..${head}".into());
            let p = CustomProvider::new(ProviderIdentity::new("code.internal", "team/app"), t);
            assert_eq!(
                p.resolve(&resource).await.unwrap().as_deref(),
                Some("https://code.internal/team/app/pr/main..topic")
            );
        }

        #[tokio::test]
        async fn comparison_present() {
            let mut t = templates();
            t.comparison = Some("https://code.internal/${repo}/diff/${ref1}${notation}${ref2}".into());
            let p = CustomProvider::new(ProviderIdentity::new("code.internal", "team/app"), t);
            let url = p.resolve(&RemoteResource::comparison("v1", "v2")).await.unwrap();
            assert_eq!(url.as_deref(), Some("https://code.internal/team/app/diff/v1...v2"));
        }
    }

    #[test]
    fn display_name_marks_custom_domain() {
        assert_eq!(custom().display_name(), "Custom (code.internal)");
    }

    #[test]
    fn default_issue_pattern() {
        assert_eq!(
            custom().issue_link_pattern(),
            "https://code.internal/team/app/issues/<num>"
        );
    }

    #[test]
    fn templates_from_toml() {
        let t: CustomUrlTemplates = toml::from_str(
            r#"
            repository = "https://h/${repo}"
            branch = "https://h/${repo}/b/${branch}"
            commit = "https://h/${repo}/c/${id}"
            file = "https://h/${repo}/f/${file}${line}"
            "#,
        )
        .unwrap();
        assert!(t.branches.is_none());
        assert!(t.missing_required().is_empty());
    }
}
