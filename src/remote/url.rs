//! remote::url
//!
//! Parsing git remote URLs into host and repository path.
//!
//! Accepted forms:
//! - scp-like: `git@github.com:owner/repo.git`
//! - `ssh://git@host:2222/owner/repo.git`, `git://host/owner/repo`
//! - `https://host/owner/repo.git`, `http://host:8080/owner/repo`

use percent_encoding::percent_decode_str;
use url::Url;

/// A remote URL split into the parts providers care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRemote {
    /// Transport scheme as written (`ssh` for scp-like URLs).
    pub scheme: String,
    /// Lowercased host. Includes the port for http(s) remotes.
    pub domain: String,
    /// Repository path without leading `/` or trailing `.git`.
    pub path: String,
}

impl ParsedRemote {
    /// Protocol to use for web links to this remote.
    ///
    /// Plain `http` remotes keep `http`; everything else browses over `https`.
    pub fn web_protocol(&self) -> &'static str {
        if self.scheme == "http" {
            "http"
        } else {
            "https"
        }
    }
}

/// Parse a git remote URL.
///
/// Percent-escapes in the path are decoded, so the result holds the raw
/// repository path and links encode it exactly once.
///
/// # Returns
///
/// `None` if the URL has no host, no repository path, or a path that does
/// not decode to UTF-8.
///
/// # Example
///
/// ```
/// use remotelink::remote::parse_remote_url;
///
/// let remote = parse_remote_url("git@github.com:octocat/hello-world.git").unwrap();
/// assert_eq!(remote.domain, "github.com");
/// assert_eq!(remote.path, "octocat/hello-world");
/// ```
pub fn parse_remote_url(remote_url: &str) -> Option<ParsedRemote> {
    let remote_url = remote_url.trim();

    if remote_url.contains("://") {
        return parse_scheme_url(remote_url);
    }

    // scp-like: [user@]host:path, with no '/' before the ':'
    let (host, path) = remote_url.split_once(':')?;
    if host.contains('/') || host.is_empty() {
        return None;
    }
    let host = host.rsplit_once('@').map(|(_, h)| h).unwrap_or(host);

    build("ssh", host, path)
}

fn parse_scheme_url(remote_url: &str) -> Option<ParsedRemote> {
    let url = Url::parse(remote_url).ok()?;
    let host = url.host_str()?;

    let domain = match (url.scheme(), url.port()) {
        ("http" | "https", Some(port)) => format!("{}:{}", host, port),
        _ => host.to_string(),
    };

    build(url.scheme(), &domain, url.path())
}

fn build(scheme: &str, domain: &str, path: &str) -> Option<ParsedRemote> {
    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let path = path.trim_end_matches('/');
    if path.is_empty() || domain.is_empty() {
        return None;
    }
    let path = percent_decode_str(path).decode_utf8().ok()?;

    Some(ParsedRemote {
        scheme: scheme.to_string(),
        domain: domain.to_lowercase(),
        path: path.into_owned(),
    })
}
