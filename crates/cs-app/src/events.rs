//! Backend event subscription.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use cs_core::history::HistoryEvent;

use crate::controller::HistoryPageController;

/// Forwards backend history events to the controller until the channel
/// closes.
pub fn spawn_history_event_listener(
    mut events: mpsc::Receiver<HistoryEvent>,
    controller: HistoryPageController,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                HistoryEvent::ClipboardMonitorUpdate { payload } => {
                    let refetched = controller.on_clipboard_updated().await;
                    debug!(%payload, refetched, "Clipboard monitor update handled");
                }
            }
        }
        info!("History event channel closed");
    })
}
