//! Line-oriented implementations of the bridge traits.
//!
//! `JsonLinesTarget` plays the parent window for a host process that embeds
//! the widget: each posted message becomes one JSON line. `TerminalUi` renders
//! the local toast and modal as plain text.

use super::messages::{OutgoingMessage, PostedMessage};
use super::{LocalUi, MessageTarget};
use crate::error::BridgeError;
use crate::manual_entry::ManualEntryForm;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Writes every posted message as a JSON line.
pub struct JsonLinesTarget<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesTarget<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl JsonLinesTarget<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> MessageTarget for JsonLinesTarget<W> {
    fn post_message(
        &self,
        message: &OutgoingMessage,
        target_origin: &str,
    ) -> Result<(), BridgeError> {
        let posted = PostedMessage {
            target_origin: target_origin.to_string(),
            data: message.clone(),
        };
        let line = serde_json::to_string(&posted)?;

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{}", line)?;
        out.flush()?;
        Ok(())
    }
}

/// Renders toasts and the manual-entry modal as text lines.
pub struct TerminalUi<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalUi<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn line(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            tracing::warn!("Failed to render: {}", e);
        }
    }
}

impl<W: Write + Send> LocalUi for TerminalUi<W> {
    fn show_toast(&self, text: &str) {
        self.line(&format!("[ok] {}", text));
    }

    fn hide_toast(&self) {}

    fn show_manual_entry(&self, form: &ManualEntryForm) {
        if let Some(advisory) = form.advisory() {
            self.line(&format!("[!] {}", advisory));
        }
        self.line(&format!(
            "Manual entry for {} (empty full name cancels)",
            form.phone()
        ));
    }

    fn hide_manual_entry(&self) {
        self.line("Manual entry closed");
    }
}
