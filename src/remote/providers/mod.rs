//! remote::providers
//!
//! Concrete URL grammars, one module per hosting service.
//!
//! Every provider builds raw URLs and passes them through
//! [`encode_url`](super::encoding::encode_url) once, right before returning.
//! Line fragments are appended after encoding so their `#` survives.

mod azure_devops;
mod bitbucket;
mod bitbucket_server;
mod custom;
mod gerrit;
mod gitea;
mod github;
mod gitlab;

pub use azure_devops::AzureDevOpsProvider;
pub use bitbucket::BitbucketProvider;
pub use bitbucket_server::BitbucketServerProvider;
pub use custom::{CustomProvider, CustomUrlTemplates};
pub use gerrit::{GerritFlavor, GerritProvider};
pub use gitea::GiteaProvider;
pub use github::GitHubProvider;
pub use gitlab::GitLabProvider;

use url::form_urlencoded;

/// Build a `key=value&...` query, skipping pairs without a value.
///
/// Values are form-encoded (space becomes `+`).
pub(crate) fn query_string(pairs: &[(&str, Option<&str>)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        if let Some(value) = value {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

/// Append `?query` (or `&query` if the URL already has one) when non-empty.
pub(crate) fn with_query(url: String, query: &str) -> String {
    if query.is_empty() {
        url
    } else if url.contains('?') {
        format!("{}&{}", url, query)
    } else {
        format!("{}?{}", url, query)
    }
}

/// Owner segment of an `owner/name` path.
pub(crate) fn path_owner(path: &str) -> &str {
    path.split_once('/').map(|(owner, _)| owner).unwrap_or(path)
}
