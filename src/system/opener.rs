//! system::opener
//!
//! URL opening via the platform's default handler.

use async_trait::async_trait;
use tracing::debug;

use super::{SystemError, UrlOpener};

/// Opens URLs in the default browser using the `open` crate.
#[derive(Debug, Clone, Default)]
pub struct SystemOpener;

impl SystemOpener {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UrlOpener for SystemOpener {
    async fn open(&self, url: &str) -> Result<bool, SystemError> {
        let target = url.to_string();
        let result = tokio::task::spawn_blocking(move || open::that(target))
            .await
            .map_err(|e| SystemError::Open(e.to_string()))?;

        match result {
            Ok(()) => Ok(true),
            Err(e) => {
                debug!(url, error = %e, "browser launch failed");
                Err(SystemError::Open(format!("{}: {}", url, e)))
            }
        }
    }
}

/// Prints URLs to stdout instead of opening them.
///
/// Used when there is no interactive session to open a browser in.
#[derive(Debug, Clone, Default)]
pub struct PrintOpener;

#[async_trait]
impl UrlOpener for PrintOpener {
    async fn open(&self, url: &str) -> Result<bool, SystemError> {
        println!("{}", url);
        Ok(true)
    }
}
