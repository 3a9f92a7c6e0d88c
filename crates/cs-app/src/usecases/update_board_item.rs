use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use cs_core::ids::{HistoryId, ItemId};
use cs_core::ports::HistoryCommandPort;

/// Overwrites a board item's value with a history entry's value.
/// 用历史条目的内容覆盖面板条目。
pub struct UpdateBoardItemFromHistory {
    history: Arc<dyn HistoryCommandPort>,
}

impl UpdateBoardItemFromHistory {
    pub fn new(history: Arc<dyn HistoryCommandPort>) -> Self {
        Self { history }
    }

    #[tracing::instrument(
        name = "usecase.update_board_item.execute",
        skip(self),
        fields(history_id = %history_id, item_id = %item_id)
    )]
    pub async fn execute(&self, history_id: &HistoryId, item_id: &ItemId) -> Result<()> {
        self.history
            .update_item_value_by_history_id(history_id, item_id)
            .await
            .context("Failed to update board item from history")?;
        info!("Board item updated from history");
        Ok(())
    }
}
