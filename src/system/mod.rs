//! system
//!
//! Platform side effects used by the batch link operations.
//!
//! # Design
//!
//! Clipboard writes and URL opening are the only irrevocable steps in link
//! handling. Both sit behind small async traits so the batch logic can be
//! exercised against recording fakes ([`mock`]) and so embedders can supply
//! their own (an editor's clipboard API, a headless opener that prints).
//!
//! # Modules
//!
//! - `clipboard`: [`SystemClipboard`], pipes text into the platform copy tool
//! - `opener`: [`SystemOpener`], launches the default browser
//! - [`mock`]: recording fakes for tests

mod clipboard;
pub mod mock;
mod opener;

pub use clipboard::SystemClipboard;
pub use opener::{PrintOpener, SystemOpener};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from platform side effects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SystemError {
    /// No usable clipboard tool was found or it failed.
    #[error("clipboard: {0}")]
    Clipboard(String),

    /// The URL could not be handed to a browser.
    #[error("open: {0}")]
    Open(String),
}

/// Writes text to a clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), SystemError>;
}

/// Opens a URL for the user.
#[async_trait]
pub trait UrlOpener: Send + Sync {
    /// Returns `Ok(true)` when the user-visible open succeeded.
    async fn open(&self, url: &str) -> Result<bool, SystemError>;
}
