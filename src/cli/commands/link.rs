//! url / open / copy commands - Resolve resources and hand the links on

use anyhow::{anyhow, bail, Context as _, Result};

use super::{load_target, provider_for, Target};
use crate::cli::args::ResourceArgs;
use crate::cli::Context;
use crate::remote::{
    copy_links, open_links, resolve_links, PullRequestBase, PullRequestHead, RemoteProvider,
    RemoteRef, RemoteResource,
};
use crate::system::{PrintOpener, SystemClipboard, SystemOpener, UrlOpener};
use crate::ui::output;

/// Print the links for a resource, one per line.
pub fn url(ctx: &Context, resource: &ResourceArgs) -> Result<()> {
    let target = load_target(ctx)?;
    let rt = tokio::runtime::Runtime::new()?;

    let (requested, urls) = rt.block_on(async {
        let resources = build_resources(ctx, &target, resource).await?;
        let requested = resources.len();
        let urls = resolve_links(target.provider.as_ref(), resources).await;
        Ok::<_, anyhow::Error>((requested, urls))
    })?;

    if urls.is_empty() {
        bail!(
            "{} cannot link to this {}",
            target.provider.display_name(),
            resource_name(resource)
        );
    }

    for url in &urls {
        output::link(url);
    }
    report_skipped(ctx, requested, urls.len());

    Ok(())
}

/// Open the links for a resource.
///
/// With `print`, links are written to stdout instead of a browser.
pub fn open(ctx: &Context, resource: &ResourceArgs, print: bool) -> Result<()> {
    let target = load_target(ctx)?;
    let opener: Box<dyn UrlOpener> = if print {
        Box::new(PrintOpener)
    } else {
        Box::new(SystemOpener::new())
    };
    let rt = tokio::runtime::Runtime::new()?;

    let opened = rt.block_on(async {
        let resources = build_resources(ctx, &target, resource).await?;
        Ok::<_, anyhow::Error>(
            open_links(target.provider.as_ref(), resources, opener.as_ref()).await,
        )
    })?;

    if !opened {
        bail!(
            "Failed to open {} link on {}",
            resource_name(resource),
            target.provider.display_name()
        );
    }

    Ok(())
}

/// Copy the links for a resource to the clipboard.
pub fn copy(ctx: &Context, resource: &ResourceArgs) -> Result<()> {
    let target = load_target(ctx)?;
    let clipboard = SystemClipboard::new();
    let rt = tokio::runtime::Runtime::new()?;

    let (requested, written) = rt.block_on(async {
        let resources = build_resources(ctx, &target, resource).await?;
        let requested = resources.len();
        let written = copy_links(target.provider.as_ref(), resources, &clipboard)
            .await
            .context("Failed to copy to the clipboard")?;
        Ok::<_, anyhow::Error>((requested, written))
    })?;

    if written == 0 {
        bail!(
            "{} cannot link to this {}",
            target.provider.display_name(),
            resource_name(resource)
        );
    }

    output::success(
        format!(
            "Copied {} link{} to the clipboard",
            written,
            if written == 1 { "" } else { "s" }
        ),
        ctx.verbosity(),
    );
    report_skipped(ctx, requested, written);

    Ok(())
}

/// Turn parsed arguments into resources.
///
/// Everything but `pr` maps directly; `pr` needs the current branch and the
/// remote each side of the request lives on.
async fn build_resources(
    ctx: &Context,
    target: &Target,
    resource: &ResourceArgs,
) -> Result<Vec<RemoteResource>> {
    if let Some(resources) = resource.to_resources() {
        return Ok(resources);
    }

    let ResourceArgs::Pr {
        base,
        head,
        head_remote,
        title,
        description,
    } = resource
    else {
        return Ok(Vec::new());
    };

    let head_branch = match head {
        Some(branch) => branch.clone(),
        None => target
            .git
            .as_ref()
            .map(|git| git.current_branch())
            .transpose()?
            .flatten()
            .ok_or_else(|| {
                anyhow!("Cannot determine the current branch. Pass the head branch explicitly.")
            })?,
    };

    let head_provider = match head_remote {
        Some(name) => {
            let git = target
                .git
                .as_ref()
                .ok_or_else(|| anyhow!("--head-remote needs a git repository"))?;
            let url = git
                .require_remote_url(name)
                .with_context(|| format!("Failed to read remote '{}'", name))?;
            Some(provider_for(ctx, &target.config, &url)?)
        }
        None => None,
    };

    let resource = pull_request(
        target.provider.as_ref(),
        head_provider.as_deref(),
        base,
        head_branch,
        title.clone(),
        description.clone(),
    )
    .await?;

    Ok(vec![resource])
}

/// Build a pull-request resource from `head` (on `head_provider`, or the
/// base remote when `None`) into `base`.
///
/// # Errors
///
/// Fails for a cross-fork request when the base provider cannot link those yet.
pub(crate) async fn pull_request(
    base_provider: &dyn RemoteProvider,
    head_provider: Option<&dyn RemoteProvider>,
    base: &str,
    head: String,
    title: Option<String>,
    description: Option<String>,
) -> Result<RemoteResource> {
    let base_remote = remote_ref(base_provider);
    let head_remote = head_provider.map_or_else(|| base_remote.clone(), remote_ref);

    if head_remote != base_remote
        && !base_provider
            .is_ready_for_cross_fork_pull_request_urls()
            .await
    {
        bail!(
            "{} cannot link pull requests across forks yet",
            base_provider.display_name()
        );
    }

    Ok(RemoteResource::CreatePullRequest {
        base: PullRequestBase {
            branch: Some(base.to_string()),
            remote: base_remote,
        },
        head: PullRequestHead {
            branch: head,
            remote: head_remote,
        },
        title,
        description,
    })
}

fn remote_ref(provider: &dyn RemoteProvider) -> RemoteRef {
    RemoteRef {
        path: provider.path().to_string(),
        url: provider.base_url(),
    }
}

fn resource_name(resource: &ResourceArgs) -> &'static str {
    match resource {
        ResourceArgs::Repo => "repository",
        ResourceArgs::Branches => "branch list",
        ResourceArgs::Branch { .. } => "branch",
        ResourceArgs::Commit { .. } => "commit",
        ResourceArgs::Compare { .. } => "comparison",
        ResourceArgs::Pr { .. } => "pull request",
        ResourceArgs::File(_) => "file",
    }
}

fn report_skipped(ctx: &Context, requested: usize, produced: usize) {
    if produced < requested {
        output::warn(
            format!("{} of {} links could not be resolved", requested - produced, requested),
            ctx.verbosity(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::mock::MockProvider;
    use crate::remote::ProviderIdentity;

    fn fork() -> MockProvider {
        MockProvider::with_identity(ProviderIdentity::new("mock.test", "someone/repo"))
    }

    mod pull_request {
        use super::*;

        #[tokio::test]
        async fn same_remote() {
            let provider = MockProvider::new();
            let resource = pull_request(&provider, None, "main", "feature".into(), None, None)
                .await
                .unwrap();

            match resource {
                RemoteResource::CreatePullRequest { base, head, .. } => {
                    assert_eq!(base.branch.as_deref(), Some("main"));
                    assert_eq!(head.branch, "feature");
                    assert_eq!(base.remote, head.remote);
                    assert_eq!(base.remote.path, "owner/repo");
                    assert_eq!(base.remote.url, "https://mock.test/owner/repo");
                }
                other => panic!("unexpected resource {:?}", other),
            }
        }

        #[tokio::test]
        async fn cross_fork_when_ready() {
            let base = MockProvider::new();
            let head = fork();
            let resource = pull_request(
                &base,
                Some(&head as &dyn RemoteProvider),
                "main",
                "feature".into(),
                Some("Title".into()),
                None,
            )
            .await
            .unwrap();

            match resource {
                RemoteResource::CreatePullRequest { head, title, .. } => {
                    assert_eq!(head.remote.path, "someone/repo");
                    assert_eq!(title.as_deref(), Some("Title"));
                }
                other => panic!("unexpected resource {:?}", other),
            }
        }

        #[tokio::test]
        async fn cross_fork_not_ready() {
            let base = MockProvider::new().cross_fork_ready(false);
            let head = fork();
            let result = pull_request(
                &base,
                Some(&head as &dyn RemoteProvider),
                "main",
                "feature".into(),
                None,
                None,
            )
            .await;
            assert!(result.is_err());
        }

        #[tokio::test]
        async fn same_remote_ignores_readiness() {
            let base = MockProvider::new().cross_fork_ready(false);
            let same = MockProvider::new();
            let result = pull_request(
                &base,
                Some(&same as &dyn RemoteProvider),
                "main",
                "feature".into(),
                None,
                None,
            )
            .await;
            assert!(result.is_ok());
        }
    }

    #[test]
    fn names() {
        assert_eq!(resource_name(&ResourceArgs::Repo), "repository");
        assert_eq!(
            resource_name(&ResourceArgs::Commit { shas: vec![] }),
            "commit"
        );
    }
}
