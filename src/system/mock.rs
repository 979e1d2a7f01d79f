//! system::mock
//!
//! Recording fakes for [`Clipboard`] and [`UrlOpener`].
//!
//! # Example
//!
//! ```
//! use remotelink::system::mock::RecordingOpener;
//! use remotelink::system::UrlOpener;
//!
//! # tokio_test::block_on(async {
//! let opener = RecordingOpener::new().fail_on("https://bad.example");
//!
//! assert_eq!(opener.open("https://good.example").await, Ok(true));
//! assert!(opener.open("https://bad.example").await.is_err());
//! assert_eq!(opener.opened().len(), 2);
//! # });
//! ```

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{Clipboard, SystemError, UrlOpener};

/// Clipboard that stores every write.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct RecordingClipboard {
    inner: Arc<Mutex<ClipboardInner>>,
}

#[derive(Debug, Default)]
struct ClipboardInner {
    writes: Vec<String>,
    fail: bool,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail.
    pub fn failing(self) -> Self {
        self.lock().fail = true;
        self
    }

    /// All successful writes, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.lock().writes.clone()
    }

    /// The most recent successful write.
    pub fn contents(&self) -> Option<String> {
        self.lock().writes.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ClipboardInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), SystemError> {
        let mut inner = self.lock();
        if inner.fail {
            return Err(SystemError::Clipboard("mock clipboard failure".into()));
        }
        inner.writes.push(text.to_string());
        Ok(())
    }
}

/// Opener that records every attempt and can be told which URLs fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingOpener {
    inner: Arc<Mutex<OpenerInner>>,
}

#[derive(Debug, Default)]
struct OpenerInner {
    opened: Vec<String>,
    fail_on: HashSet<String>,
    decline_on: HashSet<String>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return an error when asked to open `url`.
    pub fn fail_on(self, url: impl Into<String>) -> Self {
        self.lock().fail_on.insert(url.into());
        self
    }

    /// Return `Ok(false)` when asked to open `url`.
    pub fn decline_on(self, url: impl Into<String>) -> Self {
        self.lock().decline_on.insert(url.into());
        self
    }

    /// Every URL an open was attempted for, in call order.
    pub fn opened(&self) -> Vec<String> {
        self.lock().opened.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, OpenerInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl UrlOpener for RecordingOpener {
    async fn open(&self, url: &str) -> Result<bool, SystemError> {
        let mut inner = self.lock();
        inner.opened.push(url.to_string());

        if inner.fail_on.contains(url) {
            return Err(SystemError::Open(format!("mock failure for {}", url)));
        }
        Ok(!inner.decline_on.contains(url))
    }
}
