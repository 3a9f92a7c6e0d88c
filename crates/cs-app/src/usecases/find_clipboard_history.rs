use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use cs_core::history::HistoryEntry;
use cs_core::ports::HistoryCommandPort;
use cs_core::search::HistoryQuery;

/// Runs a backend search over the whole history.
pub struct FindClipboardHistory {
    history: Arc<dyn HistoryCommandPort>,
}

impl FindClipboardHistory {
    pub fn new(history: Arc<dyn HistoryCommandPort>) -> Self {
        Self { history }
    }

    #[tracing::instrument(
        name = "usecase.find_clipboard_history.execute",
        skip(self, query),
        fields(query_chars = query.query.chars().count(), filters = query.filters.len())
    )]
    pub async fn execute(&self, query: &HistoryQuery) -> Result<Vec<HistoryEntry>> {
        let found = self
            .history
            .find_clipboard_history(query)
            .await
            .context("Failed to search clipboard history")?;
        debug!(found = found.len(), "Search finished");
        Ok(found)
    }
}
