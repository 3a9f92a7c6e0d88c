use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use cs_core::ids::HistoryId;
use cs_core::ports::HistoryCommandPort;

/// Pins or unpins history entries.
/// 置顶或取消置顶历史条目。
pub struct PinHistoryEntries {
    history: Arc<dyn HistoryCommandPort>,
}

impl PinHistoryEntries {
    pub fn new(history: Arc<dyn HistoryCommandPort>) -> Self {
        Self { history }
    }

    #[tracing::instrument(
        name = "usecase.pin_history_entries.execute",
        skip(self, history_ids),
        fields(count = history_ids.len(), is_pinned = is_pinned)
    )]
    pub async fn execute(&self, history_ids: &[HistoryId], is_pinned: bool) -> Result<()> {
        if history_ids.is_empty() {
            return Ok(());
        }

        self.history
            .pinned_clipboard_history_by_ids(history_ids, is_pinned)
            .await
            .context("Failed to update pinned state")?;

        info!(count = history_ids.len(), is_pinned, "Updated pinned state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{ids, MockHistory};

    #[tokio::test]
    async fn forwards_ids_and_flag() {
        let mut history = MockHistory::new();
        history
            .expect_pinned_clipboard_history_by_ids()
            .withf(|ids_arg, pinned| ids_arg == ids(&["x"]).as_slice() && *pinned)
            .times(1)
            .returning(|_, _| Ok(()));

        PinHistoryEntries::new(Arc::new(history))
            .execute(&ids(&["x"]), true)
            .await
            .unwrap();
    }
}
