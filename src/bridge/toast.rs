//! Auto-dismissing toast.

use super::LocalUi;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Default time a toast stays visible.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Shows one toast at a time and hides it after a fixed duration.
///
/// Showing a new toast replaces the old one and restarts the timer. The timer
/// task ends when the toast is hidden, so nothing outlives the toast.
pub struct ToastPresenter {
    ui: Arc<dyn LocalUi>,
    duration: Duration,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl ToastPresenter {
    pub fn new(ui: Arc<dyn LocalUi>, duration: Duration) -> Self {
        Self {
            ui,
            duration,
            timer: Mutex::new(None),
        }
    }

    pub fn show(&self, text: &str) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timer.take() {
            previous.abort();
        }

        self.ui.show_toast(text);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let ui = self.ui.clone();
                let duration = self.duration;
                *timer = Some(handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    ui.hide_toast();
                }));
            }
            Err(_) => tracing::debug!("No async runtime; toast stays until dismissed"),
        }
    }

    /// Hide the toast now.
    pub fn dismiss(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timer.take() {
            previous.abort();
        }
        self.ui.hide_toast();
    }

    /// Whether a dismiss timer is still running.
    pub fn is_pending(&self) -> bool {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ToastPresenter {
    fn drop(&mut self) {
        if let Some(handle) = self
            .timer
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}
