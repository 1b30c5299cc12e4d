use deliverease_widget::error::BridgeError;
use deliverease_widget::{LocalUi, ManualEntryForm, MessageTarget, OutgoingMessage};
use std::sync::Mutex;

/// Parent frame stand-in that records everything posted to it.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingTarget {
    posted: Mutex<Vec<(OutgoingMessage, String)>>,
}

#[allow(dead_code)]
impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<OutgoingMessage> {
        self.posted
            .lock()
            .unwrap()
            .iter()
            .map(|(message, _)| message.clone())
            .collect()
    }

    pub fn origins(&self) -> Vec<String> {
        self.posted
            .lock()
            .unwrap()
            .iter()
            .map(|(_, origin)| origin.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.posted.lock().unwrap().len()
    }
}

impl MessageTarget for RecordingTarget {
    fn post_message(
        &self,
        message: &OutgoingMessage,
        target_origin: &str,
    ) -> Result<(), BridgeError> {
        self.posted
            .lock()
            .unwrap()
            .push((message.clone(), target_origin.to_string()));
        Ok(())
    }
}

/// Local UI stand-in that records what was rendered.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingUi {
    toasts: Mutex<Vec<String>>,
    toast_visible: Mutex<bool>,
    forms: Mutex<Vec<ManualEntryForm>>,
    modal_visible: Mutex<bool>,
}

#[allow(dead_code)]
impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn toast_visible(&self) -> bool {
        *self.toast_visible.lock().unwrap()
    }

    /// Every form the modal was opened with, oldest first.
    pub fn opened_forms(&self) -> Vec<ManualEntryForm> {
        self.forms.lock().unwrap().clone()
    }

    pub fn modal_visible(&self) -> bool {
        *self.modal_visible.lock().unwrap()
    }

    /// True when nothing was ever shown locally.
    pub fn untouched(&self) -> bool {
        self.toasts.lock().unwrap().is_empty() && self.forms.lock().unwrap().is_empty()
    }
}

impl LocalUi for RecordingUi {
    fn show_toast(&self, text: &str) {
        self.toasts.lock().unwrap().push(text.to_string());
        *self.toast_visible.lock().unwrap() = true;
    }

    fn hide_toast(&self) {
        *self.toast_visible.lock().unwrap() = false;
    }

    fn show_manual_entry(&self, form: &ManualEntryForm) {
        self.forms.lock().unwrap().push(form.clone());
        *self.modal_visible.lock().unwrap() = true;
    }

    fn hide_manual_entry(&self) {
        *self.modal_visible.lock().unwrap() = false;
    }
}
