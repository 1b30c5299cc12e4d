//! The widget controller: owns one widget instance's state and drives the
//! lookup flow from input to notification.
//!
//! All mutable state (current phone input, loading flag, transaction
//! generation, modal) lives on the controller, so any number of independent
//! widgets can run side by side.

use crate::bridge::{
    select_notifier, FrameContext, LocalUi, MessageTarget, Notifier, ToastPresenter,
};
use crate::classifier::{classify, LookupOutcome};
use crate::client::AsyncLookupClient;
use crate::config::WidgetConfig;
use crate::domain::{
    is_valid, sanitize, DeliveryAvailability, ManualEntryData, PhoneNumber, PostalCode,
};
use crate::error::{WidgetError, WidgetResult};
use crate::gateway::call_with_timeout;
use crate::i18n::{self, Catalog};
use crate::manual_entry::{ManualEntryForm, ManualEntryModal, ManualField};
use crate::metrics::Metrics;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// What the host should display in the phone field after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    /// Sanitized value (digits only)
    pub value: String,

    /// True when sanitizing altered the raw input, so the field must be overwritten
    pub changed: bool,

    /// True when the value is exactly 8 digits
    pub valid: bool,

    /// True when the value is valid and no lookup is in flight
    pub submit_enabled: bool,
}

/// Collaborators a controller is built from.
pub struct WidgetParts {
    pub client: Arc<dyn AsyncLookupClient>,
    pub parent: Arc<dyn MessageTarget>,
    pub ui: Arc<dyn LocalUi>,
    pub metrics: Metrics,
}

/// Clears the loading flag when a submission ends, however it ends.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One widget instance.
pub struct WidgetController {
    client: Arc<dyn AsyncLookupClient>,
    notifier: Arc<dyn Notifier>,
    modal: Arc<ManualEntryModal>,
    toast: Arc<ToastPresenter>,
    catalog: Catalog,
    lookup_timeout: Duration,
    metrics: Metrics,
    phone_input: Mutex<String>,
    loading: AtomicBool,
    generation: AtomicU64,
}

impl WidgetController {
    /// Build a controller. The notifier is chosen here, once, from `context`.
    pub fn new(
        context: FrameContext,
        config: &WidgetConfig,
        catalog: Catalog,
        parts: WidgetParts,
    ) -> Self {
        let toast = Arc::new(ToastPresenter::new(
            parts.ui.clone(),
            config.toast_duration(),
        ));
        let modal = Arc::new(ManualEntryModal::new(parts.ui));
        let notifier = select_notifier(context, parts.parent, toast.clone(), modal.clone());

        tracing::info!(
            ?context,
            language = %catalog.language(),
            timeout_ms = config.lookup_timeout_ms,
            "Widget initialized"
        );

        Self {
            client: parts.client,
            notifier,
            modal,
            toast,
            catalog,
            lookup_timeout: config.lookup_timeout(),
            metrics: parts.metrics,
            phone_input: Mutex::new(String::new()),
            loading: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    pub fn context(&self) -> FrameContext {
        self.notifier.context()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    fn phone_input(&self) -> MutexGuard<'_, String> {
        self.phone_input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn state_for(&self, value: String, changed: bool) -> InputState {
        let valid = is_valid(&value);
        InputState {
            submit_enabled: valid && !self.is_loading(),
            value,
            changed,
            valid,
        }
    }

    /// Current phone field state.
    pub fn input_state(&self) -> InputState {
        let value = self.phone_input().clone();
        self.state_for(value, false)
    }

    /// Handle a keystroke: sanitize the raw field value and store it.
    pub fn on_input(&self, raw: &str) -> InputState {
        let value = sanitize(raw);
        let changed = value != raw;
        *self.phone_input() = value.clone();
        self.state_for(value, changed)
    }

    /// Handle a paste. Sanitizing waits one scheduler tick so the host can
    /// finish inserting the pasted text first; `read_field` is called after
    /// that tick and must return the field's current value.
    pub async fn on_paste<F>(&self, read_field: F) -> InputState
    where
        F: FnOnce() -> String,
    {
        tokio::task::yield_now().await;
        self.on_input(&read_field())
    }

    /// Look up the address for the current phone input and notify the outcome.
    ///
    /// Fails without touching the network when the input is invalid or a
    /// lookup is already running. Lookup failures are not errors; they come
    /// back as an outcome after the manual-entry path has been opened.
    /// If the widget was reset while the call was in flight, the outcome is
    /// returned but nothing is shown or posted.
    pub async fn submit(&self) -> WidgetResult<LookupOutcome> {
        let phone = PhoneNumber::new(self.phone_input().clone())?;

        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(WidgetError::Busy);
        }
        let _loading = LoadingGuard(&self.loading);
        let token = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        tracing::debug!(%phone, token, "Submitting address lookup");
        let result =
            call_with_timeout(self.client.lookup_address(&phone), self.lookup_timeout).await;
        let outcome = classify(result);

        if self.generation.load(Ordering::Acquire) != token {
            tracing::debug!(
                token,
                kind = ?outcome.kind(),
                "Dropping outcome of superseded lookup"
            );
            self.metrics.record_stale_outcome();
            return Ok(outcome);
        }

        self.metrics.record_outcome(outcome.kind());
        tracing::info!(kind = ?outcome.kind(), "Lookup finished");

        let message = self.catalog.get(outcome.message_key());
        self.notifier.notify(&phone, &outcome, &message)?;
        Ok(outcome)
    }

    /// Abandon the current transaction and clear the form.
    ///
    /// A lookup still in flight settles silently.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.phone_input().clear();
        if self.modal.is_open() && self.modal.cancel().is_ok() {
            self.metrics.record_manual_entry_cancelled();
        }
        self.toast.dismiss();
    }

    /// Open the manual-entry modal on demand for the current phone number.
    pub fn open_manual_entry(&self) -> WidgetResult<()> {
        let phone = PhoneNumber::new(self.phone_input().clone())?;
        self.modal.open(phone, None);
        Ok(())
    }

    pub fn manual_entry(&self) -> Option<ManualEntryForm> {
        self.modal.form()
    }

    pub fn set_manual_field(&self, field: ManualField, value: &str) -> WidgetResult<()> {
        Ok(self.modal.set_field(field, value)?)
    }

    /// Submit the manual-entry form: forward it when embedded, confirm with a
    /// toast either way.
    pub fn submit_manual_entry(&self) -> WidgetResult<ManualEntryData> {
        let data = self.modal.submit()?;
        self.notifier.manual_data(&data)?;
        self.toast.show(&self.catalog.get(i18n::MANUAL_ENTRY_SUCCESS));
        self.metrics.record_manual_entry_submitted();
        tracing::info!(phone = %data.phone_number, "Manual entry submitted");
        Ok(data)
    }

    /// Close the manual-entry form and drop what was typed.
    pub fn cancel_manual_entry(&self) -> WidgetResult<()> {
        self.modal.cancel()?;
        self.metrics.record_manual_entry_cancelled();
        tracing::debug!("Manual entry cancelled");
        Ok(())
    }

    /// Ask which delivery options exist for `postal_code`.
    pub async fn check_delivery(
        &self,
        postal_code: &PostalCode,
    ) -> WidgetResult<DeliveryAvailability> {
        let language = self.catalog.language();
        let availability = call_with_timeout(
            self.client.check_delivery(postal_code, language),
            self.lookup_timeout,
        )
        .await?;

        tracing::info!(
            %postal_code,
            serviceable = availability.serviceable,
            options = availability.delivery_options.len(),
            "Delivery availability checked"
        );
        Ok(availability)
    }
}
