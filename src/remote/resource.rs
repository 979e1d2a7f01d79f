//! remote::resource
//!
//! Typed requests for "the URL of X".
//!
//! A [`RemoteResource`] is built per call and thrown away once resolved. It
//! carries exactly the data a provider needs to build one link.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Notation used in a comparison between two refs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComparisonNotation {
    /// `a..b`: commits reachable from `b` but not `a`.
    #[serde(rename = "..")]
    TwoDot,
    /// `a...b`: commits unique to `b` since the merge base.
    #[default]
    #[serde(rename = "...")]
    ThreeDot,
}

impl ComparisonNotation {
    /// The literal separator placed between the two refs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonNotation::TwoDot => "..",
            ComparisonNotation::ThreeDot => "...",
        }
    }

    /// Parse `..` or `...`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            ".." => Some(ComparisonNotation::TwoDot),
            "..." => Some(ComparisonNotation::ThreeDot),
            _ => None,
        }
    }
}

impl fmt::Display for ComparisonNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inclusive, 1-based line range within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    /// Create a range, swapping the bounds if given in reverse.
    pub fn new(start: u32, end: u32) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A range covering one line.
    pub fn line(line: u32) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// Whether the range covers a single line.
    pub fn is_single_line(&self) -> bool {
        self.start == self.end
    }

    /// Parse `12` or `12-20`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.split_once('-') {
            Some((a, b)) => Some(Self::new(a.trim().parse().ok()?, b.trim().parse().ok()?)),
            None => s.trim().parse().ok().map(Self::line),
        }
    }
}

/// A remote repository as seen from one side of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRef {
    /// `owner/name` path of the repository on the host.
    pub path: String,
    /// Base web URL of the repository.
    pub url: String,
}

/// Target side of a pull request. The branch may be left to the host's default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestBase {
    pub branch: Option<String>,
    pub remote: RemoteRef,
}

/// Source side of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestHead {
    pub branch: String,
    pub remote: RemoteRef,
}

/// Prefilled fields for a pull-request creation link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestOptions {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PullRequestOptions {
    /// Whether neither field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// A request for the link to one thing on a remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemoteResource {
    /// History of a branch.
    Branch { branch: String },
    /// Branch listing.
    Branches,
    /// A single commit.
    Commit { sha: String },
    /// Diff between two refs. `notation` defaults to three-dot when absent.
    Comparison {
        base: String,
        compare: String,
        notation: Option<ComparisonNotation>,
    },
    /// Page for opening a pull request from `head` into `base`.
    CreatePullRequest {
        base: PullRequestBase,
        head: PullRequestHead,
        title: Option<String>,
        description: Option<String>,
    },
    /// A file, optionally at a branch or tag.
    File {
        file_name: String,
        branch_or_tag: Option<String>,
        range: Option<LineRange>,
    },
    /// Repository landing page.
    Repo,
    /// A file at a specific commit.
    Revision {
        file_name: String,
        branch_or_tag: Option<String>,
        sha: Option<String>,
        range: Option<LineRange>,
    },
    /// A tag. No provider links tags yet; always resolves to nothing.
    Tag { tag: String },
}

impl RemoteResource {
    /// Short kind name, used in logs and by the CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteResource::Branch { .. } => "branch",
            RemoteResource::Branches => "branches",
            RemoteResource::Commit { .. } => "commit",
            RemoteResource::Comparison { .. } => "comparison",
            RemoteResource::CreatePullRequest { .. } => "create_pull_request",
            RemoteResource::File { .. } => "file",
            RemoteResource::Repo => "repo",
            RemoteResource::Revision { .. } => "revision",
            RemoteResource::Tag { .. } => "tag",
        }
    }

    pub fn branch(branch: impl Into<String>) -> Self {
        RemoteResource::Branch {
            branch: branch.into(),
        }
    }

    pub fn commit(sha: impl Into<String>) -> Self {
        RemoteResource::Commit { sha: sha.into() }
    }

    /// Comparison with the default (three-dot) notation.
    pub fn comparison(base: impl Into<String>, compare: impl Into<String>) -> Self {
        RemoteResource::Comparison {
            base: base.into(),
            compare: compare.into(),
            notation: None,
        }
    }

    pub fn file(file_name: impl Into<String>, branch_or_tag: Option<String>) -> Self {
        RemoteResource::File {
            file_name: file_name.into(),
            branch_or_tag,
            range: None,
        }
    }
}

/// One or many resources, as accepted by the batch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resources(Vec<RemoteResource>);

impl Resources {
    pub fn as_slice(&self) -> &[RemoteResource] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<RemoteResource> for Resources {
    fn from(resource: RemoteResource) -> Self {
        Resources(vec![resource])
    }
}

impl From<Vec<RemoteResource>> for Resources {
    fn from(resources: Vec<RemoteResource>) -> Self {
        Resources(resources)
    }
}

impl From<&[RemoteResource]> for Resources {
    fn from(resources: &[RemoteResource]) -> Self {
        Resources(resources.to_vec())
    }
}
