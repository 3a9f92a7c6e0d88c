use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{info, warn};

use cs_core::ports::{NotificationPort, Toast, ToastLevel};

/// Writes toasts to the log and keeps them for headless callers.
#[derive(Debug, Default)]
pub struct TracingNotifier {
    delivered: Mutex<Vec<Toast>>,
}

impl TracingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<Toast> {
        self.delivered
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl NotificationPort for TracingNotifier {
    async fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Info => info!(text = %toast.message, "toast"),
            ToastLevel::Error => warn!(text = %toast.message, "toast"),
        }
        self.delivered
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(toast);
    }
}
