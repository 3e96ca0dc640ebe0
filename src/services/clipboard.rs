// src/services/clipboard.rs
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::ClipboardError;

/// How long a copy button shows its "Copied" acknowledgment.
pub const COPY_ACK_DURATION: Duration = Duration::from_millis(1200);

#[async_trait]
pub trait ClipboardBackend: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopyOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ClipboardFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardFailure {
    PlatformUnsupported,
}

impl CopyOutcome {
    pub fn copied() -> Self {
        Self {
            success: true,
            reason: None,
        }
    }

    pub fn unsupported() -> Self {
        Self {
            success: false,
            reason: Some(ClipboardFailure::PlatformUnsupported),
        }
    }
}

/// Best-effort clipboard write. Failures are reported, never raised.
pub async fn copy(backend: &dyn ClipboardBackend, text: &str) -> CopyOutcome {
    match backend.write_text(text).await {
        Ok(()) => CopyOutcome::copied(),
        Err(e) => {
            tracing::debug!("Clipboard unavailable: {}", e);
            CopyOutcome::unsupported()
        }
    }
}

/// Copy button state: the default label, or the acknowledgment label for
/// `COPY_ACK_DURATION` after a successful copy. Only the most recent press
/// may clear the acknowledgment.
#[derive(Clone)]
pub struct CopyButton {
    label: String,
    done_label: String,
    acknowledged: Arc<AtomicBool>,
    generation: Arc<AtomicU64>,
}

impl CopyButton {
    pub fn new(label: impl Into<String>, done_label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            done_label: done_label.into(),
            acknowledged: Arc::new(AtomicBool::new(false)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn label(&self) -> &str {
        if self.is_acknowledged() {
            &self.done_label
        } else {
            &self.label
        }
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged.load(Ordering::SeqCst)
    }

    pub async fn press(&self, backend: &dyn ClipboardBackend, text: &str) -> CopyOutcome {
        let outcome = copy(backend, text).await;
        if !outcome.success {
            return outcome;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.acknowledged.store(true, Ordering::SeqCst);

        let acknowledged = self.acknowledged.clone();
        let current = self.generation.clone();
        tokio::spawn(async move {
            tokio::time::sleep(COPY_ACK_DURATION).await;
            if current.load(Ordering::SeqCst) == generation {
                acknowledged.store(false, Ordering::SeqCst);
            }
        });

        outcome
    }
}

/// Platform clipboard through the usual command-line helpers. Each tool is
/// tried in order until one accepts the text.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    tools: &'static [(&'static str, &'static [&'static str])],
}

const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("clip", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

impl SystemClipboard {
    pub fn with_tools(tools: &'static [(&'static str, &'static [&'static str])]) -> Self {
        Self { tools }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::with_tools(CLIPBOARD_TOOLS)
    }
}

#[async_trait]
impl ClipboardBackend for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut attempted = false;

        for (program, args) in self.tools {
            let mut child = match Command::new(program)
                .args(*args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(child) => child,
                Err(_) => continue,
            };
            attempted = true;

            // stdin is dropped at the end of this block so the tool sees EOF.
            let written = match child.stdin.take() {
                Some(mut stdin) => stdin.write_all(text.as_bytes()).await.is_ok(),
                None => false,
            };

            // Always reap the child, even when the write failed.
            match child.wait().await {
                Ok(status) if written && status.success() => {
                    tracing::debug!("Copied {} bytes via {}", text.len(), program);
                    return Ok(());
                }
                _ => tracing::debug!("Clipboard tool {} failed, trying the next one", program),
            }
        }

        if attempted {
            Err(ClipboardError::WriteFailed)
        } else {
            Err(ClipboardError::PlatformUnsupported)
        }
    }
}

/// Headless deployments have no clipboard at all.
#[derive(Debug, Clone, Default)]
pub struct NoClipboard;

#[async_trait]
impl ClipboardBackend for NoClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::PlatformUnsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MemoryClipboard {
        contents: Mutex<Option<String>>,
    }

    #[async_trait]
    impl ClipboardBackend for MemoryClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            *self.contents.lock().await = Some(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_copy_success() {
        let clipboard = MemoryClipboard::default();
        assert_eq!(copy(&clipboard, "abc").await, CopyOutcome::copied());
        assert_eq!(clipboard.contents.lock().await.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_copy_failure_is_reported_not_raised() {
        let outcome = copy(&NoClipboard, "abc").await;
        assert!(!outcome.success);
        assert_eq!(outcome.reason, Some(ClipboardFailure::PlatformUnsupported));
    }

    #[tokio::test(start_paused = true)]
    async fn test_acknowledgment_reverts_after_window() {
        let clipboard = MemoryClipboard::default();
        let button = CopyButton::new("Copy", "Copied");
        assert_eq!(button.label(), "Copy");

        assert!(button.press(&clipboard, "abc").await.success);
        assert_eq!(button.label(), "Copied");

        tokio::time::sleep(COPY_ACK_DURATION - Duration::from_millis(100)).await;
        assert!(button.is_acknowledged());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!button.is_acknowledged());
        assert_eq!(button.label(), "Copy");
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_press_restarts_window() {
        let clipboard = MemoryClipboard::default();
        let button = CopyButton::new("Copy", "Copied");

        button.press(&clipboard, "a").await;
        tokio::time::sleep(Duration::from_millis(800)).await;
        button.press(&clipboard, "b").await;

        // First timer fires here but must not clear the newer acknowledgment.
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(button.is_acknowledged());

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert!(!button.is_acknowledged());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_clipboard_falls_through_failing_tools() {
        // `false` exits at once, so its pipe may break mid-write.
        let clipboard = SystemClipboard::with_tools(&[
            ("waoc-no-such-clipboard-tool", &[]),
            ("false", &[]),
            ("sh", &["-c", "cat > /dev/null"]),
        ]);
        assert_eq!(clipboard.write_text(&"x".repeat(1 << 20)).await, Ok(()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_clipboard_errors() {
        let failing = SystemClipboard::with_tools(&[("false", &[])]);
        assert_eq!(failing.write_text("abc").await, Err(ClipboardError::WriteFailed));

        let missing = SystemClipboard::with_tools(&[("waoc-no-such-clipboard-tool", &[])]);
        assert_eq!(
            missing.write_text("abc").await,
            Err(ClipboardError::PlatformUnsupported)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_press_keeps_default_label() {
        let button = CopyButton::new("复制", "已复制");
        let outcome = button.press(&NoClipboard, "abc").await;
        assert_eq!(outcome, CopyOutcome::unsupported());
        assert_eq!(button.label(), "复制");
    }
}
