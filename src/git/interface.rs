//! git::interface
//!
//! Git interface implementation using git2.
//!
//! Only what link resolution needs from a repository is exposed: where the
//! repository is, which remotes it has and what HEAD points at.
//!
//! # Error Handling
//!
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::RemoteNotFound`]: The named remote does not exist
//! - [`GitError::Internal`]: Any other git2 failure
//!
//! # Example
//!
//! ```no_run
//! use remotelink::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! if let Some(url) = git.remote_url("origin").unwrap() {
//!     println!("origin is {}", url);
//! }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// The named remote does not exist or has no URL.
    #[error("remote not found: {name}")]
    RemoteNotFound {
        /// Remote name
        name: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// Handle to a Git repository.
pub struct Git {
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::Internal`] if a repository was found but cannot be opened
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|e| match e.code() {
            git2::ErrorCode::NotFound => GitError::NotARepo {
                path: path.to_path_buf(),
            },
            _ => e.into(),
        })?;

        Ok(Self { repo })
    }

    /// The `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// The working directory, or `None` for a bare repository.
    pub fn work_dir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Directory holding repo-scoped configuration.
    ///
    /// The working directory when there is one, otherwise the parent of the
    /// git directory.
    pub fn root(&self) -> PathBuf {
        match self.work_dir() {
            Some(dir) => dir.to_path_buf(),
            None => self
                .git_dir()
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.git_dir().to_path_buf()),
        }
    }

    // =========================================================================
    // Remote Operations
    // =========================================================================

    /// Get the URL for a remote.
    ///
    /// Returns `None` if the remote doesn't exist.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>, GitError> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(String::from)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) if e.code() == git2::ErrorCode::InvalidSpec => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the URL for a remote, failing if it is missing.
    pub fn require_remote_url(&self, name: &str) -> Result<String, GitError> {
        self.remote_url(name)?
            .ok_or_else(|| GitError::RemoteNotFound {
                name: name.to_string(),
            })
    }

    /// Names of all configured remotes.
    pub fn remote_names(&self) -> Result<Vec<String>, GitError> {
        let remotes = self.repo.remotes()?;
        Ok(remotes.iter().flatten().map(String::from).collect())
    }

    /// Get the default remote name.
    ///
    /// Prefers "origin", otherwise the first remote; `None` if there are none.
    pub fn default_remote(&self) -> Result<Option<String>, GitError> {
        let names = self.remote_names()?;
        if names.iter().any(|n| n == "origin") {
            return Ok(Some("origin".to_string()));
        }
        Ok(names.into_iter().next())
    }

    // =========================================================================
    // HEAD
    // =========================================================================

    /// Get the current branch name.
    ///
    /// Returns `None` if HEAD is detached or unborn.
    pub fn current_branch(&self) -> Result<Option<String>, GitError> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            return Ok(head.shorthand().map(String::from));
        }

        Ok(None)
    }
}
