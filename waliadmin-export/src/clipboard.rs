//! Clipboard port: best-effort hand-off of a wrapped document.
//!
//! [`transfer`] is the only entry point callers need: it never fails loudly,
//! it logs and reports `false`.

use std::time::{Duration, Instant};

use crate::envelope::plain_text;
use crate::error::ClipboardError;

/// Destination that accepts rich HTML plus a plain-text alternative.
pub trait Clipboard {
    fn write_html(&mut self, html: &str, alt_text: &str) -> Result<(), ClipboardError>;
}

/// In-process clipboard. Holds the last successful write.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryClipboard {
    pub html: Option<String>,
    pub alt_text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_html(&mut self, html: &str, alt_text: &str) -> Result<(), ClipboardError> {
        self.html = Some(html.to_string());
        self.alt_text = Some(alt_text.to_string());
        Ok(())
    }
}

/// The operating-system clipboard.
///
/// On X11 the copied document is served by this process. `write_html` blocks
/// until another owner (usually a clipboard manager) takes the selection over
/// or `hold` elapses; without a manager, pasting only works during that window.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
    hold: Duration,
}

impl SystemClipboard {
    pub fn new(hold: Duration) -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(SystemClipboard { inner, hold })
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }
}

/// Latest moment a selection is served after a write started at `now`.
pub fn hold_deadline(now: Instant, hold: Duration) -> Instant {
    now.checked_add(hold).unwrap_or(now)
}

impl Clipboard for SystemClipboard {
    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))]
    fn write_html(&mut self, html: &str, alt_text: &str) -> Result<(), ClipboardError> {
        use arboard::SetExtLinux;

        tracing::debug!("serving clipboard selection for up to {:?}", self.hold);
        self.inner
            .set()
            .wait_until(hold_deadline(Instant::now(), self.hold))
            .html(html, Some(alt_text))
            .map_err(|e| ClipboardError::Rejected(e.to_string()))
    }

    #[cfg(not(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )))]
    fn write_html(&mut self, html: &str, alt_text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_html(html, Some(alt_text))
            .map_err(|e| ClipboardError::Rejected(e.to_string()))
    }
}

/// Place `html` on `port`. Returns whether the write succeeded; failures are
/// logged, never propagated. One attempt, no retry.
pub fn transfer(port: &mut dyn Clipboard, html: &str) -> bool {
    if html.trim().is_empty() {
        tracing::warn!("clipboard transfer skipped: empty document");
        return false;
    }
    match port.write_html(html, &plain_text(html)) {
        Ok(()) => {
            tracing::info!("copied {} bytes of HTML to clipboard", html.len());
            true
        }
        Err(e) => {
            tracing::warn!("clipboard transfer failed: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Refusing;

    impl Clipboard for Refusing {
        fn write_html(&mut self, _html: &str, _alt: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Rejected("permission denied".to_string()))
        }
    }

    #[test]
    fn transfer_stores_html_and_alt_text() {
        let mut clip = MemoryClipboard::new();
        assert!(transfer(&mut clip, "<p>Rekap</p>"));
        assert_eq!(clip.html.as_deref(), Some("<p>Rekap</p>"));
        assert_eq!(clip.alt_text.as_deref(), Some("Rekap"));
    }

    #[test]
    fn empty_content_is_not_transferred() {
        let mut clip = MemoryClipboard::new();
        assert!(!transfer(&mut clip, "  \n"));
        assert_eq!(clip, MemoryClipboard::default());
    }

    #[test]
    fn hold_deadline_adds_hold_and_saturates() {
        let now = Instant::now();
        assert_eq!(hold_deadline(now, Duration::from_secs(10)), now + Duration::from_secs(10));
        assert_eq!(hold_deadline(now, Duration::ZERO), now);
        assert_eq!(hold_deadline(now, Duration::MAX), now);
    }

    #[test]
    fn failing_port_returns_false() {
        assert!(!transfer(&mut Refusing, "<p>x</p>"));
    }
}
