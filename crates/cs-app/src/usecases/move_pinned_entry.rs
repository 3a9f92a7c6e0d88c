use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use cs_core::pinned::PinnedMove;
use cs_core::ports::HistoryCommandPort;

/// Moves a pinned entry one slot up or down.
/// 上移/下移置顶条目。
pub struct MovePinnedEntry {
    history: Arc<dyn HistoryCommandPort>,
}

impl MovePinnedEntry {
    pub fn new(history: Arc<dyn HistoryCommandPort>) -> Self {
        Self { history }
    }

    #[tracing::instrument(
        name = "usecase.move_pinned_entry.execute",
        skip(self, request),
        fields(history_id = %request.history_id, direction = ?request.direction)
    )]
    pub async fn execute(&self, request: &PinnedMove) -> Result<()> {
        self.history
            .move_pinned_clipboard_history_up_down(request)
            .await
            .with_context(|| format!("Failed to move pinned entry {}", request.history_id))?;

        info!("Moved pinned entry");
        Ok(())
    }
}
