//! remote::links
//!
//! Batch link operations with partial-failure tolerance.
//!
//! # Design
//!
//! Every resource in a batch is resolved concurrently and every resolution
//! runs to completion (settle-all). Failed and empty resolutions are dropped;
//! the survivors keep their input order. Only then is the irrevocable step
//! taken: one clipboard write, or one open per URL.
//!
//! Per-item failures are logged at `debug` and never returned. Callers only
//! see which links were produced.
//!
//! # Example
//!
//! ```
//! use remotelink::remote::providers::GitHubProvider;
//! use remotelink::remote::{copy_links, ProviderIdentity, RemoteResource};
//! use remotelink::system::mock::RecordingClipboard;
//!
//! # tokio_test::block_on(async {
//! let github = GitHubProvider::new(ProviderIdentity::new("github.com", "o/r"));
//! let clipboard = RecordingClipboard::new();
//!
//! let written = copy_links(
//!     &github,
//!     vec![RemoteResource::commit("a1"), RemoteResource::commit("b2")],
//!     &clipboard,
//! )
//! .await
//! .unwrap();
//!
//! assert_eq!(written, 2);
//! assert_eq!(
//!     clipboard.contents().as_deref(),
//!     Some("https://github.com/o/r/commit/a1\nhttps://github.com/o/r/commit/b2")
//! );
//! # });
//! ```

use futures::future::join_all;
use tracing::debug;

use super::resource::Resources;
use super::traits::RemoteProvider;
use crate::system::{Clipboard, SystemError, UrlOpener};

/// Resolve every resource and keep the links that were produced, in order.
///
/// Never fails: errors and "no link" results are dropped.
pub async fn resolve_links<P>(provider: &P, resources: impl Into<Resources>) -> Vec<String>
where
    P: RemoteProvider + ?Sized,
{
    let resources = resources.into();
    let outcomes = join_all(resources.as_slice().iter().map(|r| provider.resolve(r))).await;

    resources
        .as_slice()
        .iter()
        .zip(outcomes)
        .filter_map(|(resource, outcome)| match outcome {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                debug!(
                    provider = provider.id(),
                    kind = resource.kind(),
                    "no link for resource"
                );
                None
            }
            Err(e) => {
                debug!(
                    provider = provider.id(),
                    kind = resource.kind(),
                    error = %e,
                    "resolution failed"
                );
                None
            }
        })
        .collect()
}

/// Copy the links for `resources` to the clipboard, one per line.
///
/// Nothing is written when no link could be produced.
///
/// # Returns
///
/// The number of links written.
///
/// # Errors
///
/// Returns the clipboard error if the write itself fails.
pub async fn copy_links<P>(
    provider: &P,
    resources: impl Into<Resources>,
    clipboard: &dyn Clipboard,
) -> Result<usize, SystemError>
where
    P: RemoteProvider + ?Sized,
{
    let urls = resolve_links(provider, resources).await;
    if urls.is_empty() {
        return Ok(0);
    }

    clipboard.write_text(&urls.join("\n")).await?;
    Ok(urls.len())
}

/// Open the links for `resources`.
///
/// Every resolved link is opened, even after an earlier one failed.
///
/// # Returns
///
/// `true` only if at least one link resolved and every open succeeded.
pub async fn open_links<P>(
    provider: &P,
    resources: impl Into<Resources>,
    opener: &dyn UrlOpener,
) -> bool
where
    P: RemoteProvider + ?Sized,
{
    let urls = resolve_links(provider, resources).await;
    if urls.is_empty() {
        return false;
    }

    let results = join_all(urls.iter().map(|url| opener.open(url))).await;

    urls.iter().zip(results).fold(true, |all_ok, (url, result)| {
        let ok = match result {
            Ok(opened) => opened,
            Err(e) => {
                debug!(url = url.as_str(), error = %e, "open failed");
                false
            }
        };
        all_ok && ok
    })
}
