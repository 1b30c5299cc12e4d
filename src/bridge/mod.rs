//! Embedding bridge: routes lookup outcomes to the parent frame or local UI.
//!
//! The frame context is decided once when the widget is built. Embedded
//! widgets forward every outcome to the parent as an [`OutgoingMessage`] and
//! render nothing themselves; standalone widgets show a toast or open the
//! local manual-entry modal. Call sites only see [`Notifier`].

pub mod messages;
pub mod terminal;
pub mod toast;

pub use messages::{OpenPopupPayload, OutgoingMessage, PostedMessage, TARGET_ORIGIN_ANY};
pub use terminal::{JsonLinesTarget, TerminalUi};
pub use toast::ToastPresenter;

use crate::classifier::LookupOutcome;
use crate::domain::{ManualEntryData, PhoneNumber};
use crate::error::BridgeError;
use crate::manual_entry::{ManualEntryForm, ManualEntryModal};
use std::sync::Arc;

/// Where the widget is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameContext {
    /// Inside a frame whose parent is a different window
    Embedded,
    /// Top-level page
    Standalone,
}

impl FrameContext {
    /// Decide the context from the host's "parent is not this window" check.
    pub fn detect(parent_is_other_window: bool) -> Self {
        if parent_is_other_window {
            FrameContext::Embedded
        } else {
            FrameContext::Standalone
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, FrameContext::Embedded)
    }
}

/// The parent window's message channel.
pub trait MessageTarget: Send + Sync {
    fn post_message(&self, message: &OutgoingMessage, target_origin: &str)
        -> Result<(), BridgeError>;
}

/// Primitive rendering operations of the widget's own UI.
pub trait LocalUi: Send + Sync {
    fn show_toast(&self, text: &str);

    fn hide_toast(&self);

    fn show_manual_entry(&self, form: &ManualEntryForm);

    fn hide_manual_entry(&self);
}

/// User-facing notification of lookup outcomes.
pub trait Notifier: Send + Sync {
    fn context(&self) -> FrameContext;

    /// Present the terminal outcome of one lookup. `message` is the localized
    /// text for the outcome.
    fn notify(
        &self,
        phone: &PhoneNumber,
        outcome: &LookupOutcome,
        message: &str,
    ) -> Result<(), BridgeError>;

    /// Hand manually entered data to whoever consumes it.
    fn manual_data(&self, data: &ManualEntryData) -> Result<(), BridgeError>;
}

/// Embedded mode: everything goes to the parent frame.
pub struct ForwardingNotifier {
    parent: Arc<dyn MessageTarget>,
}

impl ForwardingNotifier {
    pub fn new(parent: Arc<dyn MessageTarget>) -> Self {
        Self { parent }
    }

    fn post(&self, message: OutgoingMessage) -> Result<(), BridgeError> {
        tracing::debug!(
            message_type = message.message_type(),
            "Posting message to parent"
        );
        self.parent.post_message(&message, TARGET_ORIGIN_ANY)
    }
}

impl Notifier for ForwardingNotifier {
    fn context(&self) -> FrameContext {
        FrameContext::Embedded
    }

    fn notify(
        &self,
        phone: &PhoneNumber,
        outcome: &LookupOutcome,
        message: &str,
    ) -> Result<(), BridgeError> {
        let payload = match outcome {
            LookupOutcome::Success(address) => {
                OpenPopupPayload::found(phone.clone(), address.clone())
            }
            _ => OpenPopupPayload::manual(phone.clone(), message),
        };
        self.post(OutgoingMessage::OpenPopup(payload))
    }

    fn manual_data(&self, data: &ManualEntryData) -> Result<(), BridgeError> {
        self.post(OutgoingMessage::ManualData(data.clone()))
    }
}

/// Standalone mode: toast on success, local modal otherwise.
pub struct LocalNotifier {
    toast: Arc<ToastPresenter>,
    modal: Arc<ManualEntryModal>,
}

impl LocalNotifier {
    pub fn new(toast: Arc<ToastPresenter>, modal: Arc<ManualEntryModal>) -> Self {
        Self { toast, modal }
    }
}

impl Notifier for LocalNotifier {
    fn context(&self) -> FrameContext {
        FrameContext::Standalone
    }

    fn notify(
        &self,
        phone: &PhoneNumber,
        outcome: &LookupOutcome,
        message: &str,
    ) -> Result<(), BridgeError> {
        match outcome {
            LookupOutcome::Success(_) => self.toast.show(message),
            _ => self.modal.open(phone.clone(), Some(message.to_string())),
        }
        Ok(())
    }

    fn manual_data(&self, _data: &ManualEntryData) -> Result<(), BridgeError> {
        Ok(())
    }
}

/// Build the notifier for `context`.
pub fn select_notifier(
    context: FrameContext,
    parent: Arc<dyn MessageTarget>,
    toast: Arc<ToastPresenter>,
    modal: Arc<ManualEntryModal>,
) -> Arc<dyn Notifier> {
    match context {
        FrameContext::Embedded => Arc::new(ForwardingNotifier::new(parent)),
        FrameContext::Standalone => Arc::new(LocalNotifier::new(toast, modal)),
    }
}
