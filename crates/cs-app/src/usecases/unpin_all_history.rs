use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use cs_core::ports::HistoryCommandPort;

pub struct UnpinAllHistory {
    history: Arc<dyn HistoryCommandPort>,
}

impl UnpinAllHistory {
    pub fn new(history: Arc<dyn HistoryCommandPort>) -> Self {
        Self { history }
    }

    #[tracing::instrument(name = "usecase.unpin_all_history.execute", skip(self))]
    pub async fn execute(&self) -> Result<()> {
        self.history
            .unpin_all_clipboard_history()
            .await
            .context("Failed to unpin all history entries")?;
        info!("Unpinned all history entries");
        Ok(())
    }
}
