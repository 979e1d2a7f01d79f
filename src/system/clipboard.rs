//! system::clipboard
//!
//! Clipboard access by piping into the platform copy tool.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::{Clipboard, SystemError};

/// Copy tools tried in order on this platform.
#[cfg(target_os = "macos")]
const CANDIDATES: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const CANDIDATES: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// The desktop clipboard.
#[derive(Debug, Clone, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }

    async fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<(), SystemError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SystemError::Clipboard(format!("{}: {}", program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| SystemError::Clipboard(format!("{}: {}", program, e)))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| SystemError::Clipboard(format!("{}: {}", program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(SystemError::Clipboard(format!(
                "{} exited with {}",
                program, status
            )))
        }
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), SystemError> {
        let mut last_error = None;

        for (program, args) in CANDIDATES {
            match Self::pipe_to(program, args, text).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    debug!(program, error = %e, "clipboard tool failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| SystemError::Clipboard("no clipboard tool available".into())))
    }
}
