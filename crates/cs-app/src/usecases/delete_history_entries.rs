use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use cs_core::ids::HistoryId;
use cs_core::ports::HistoryCommandPort;

/// Deletes history entries by id.
/// 按 id 删除历史条目。
pub struct DeleteHistoryEntries {
    history: Arc<dyn HistoryCommandPort>,
}

impl DeleteHistoryEntries {
    pub fn new(history: Arc<dyn HistoryCommandPort>) -> Self {
        Self { history }
    }

    /// An empty id list is accepted and sends nothing to the backend.
    #[tracing::instrument(
        name = "usecase.delete_history_entries.execute",
        skip(self, history_ids),
        fields(count = history_ids.len())
    )]
    pub async fn execute(&self, history_ids: &[HistoryId]) -> Result<()> {
        if history_ids.is_empty() {
            return Ok(());
        }

        self.history
            .delete_clipboard_history_by_ids(history_ids)
            .await
            .with_context(|| format!("Failed to delete {} history entries", history_ids.len()))?;

        info!(count = history_ids.len(), "Deleted history entries");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{ids, MockHistory};

    #[tokio::test]
    async fn deletes_the_given_ids_once() {
        let mut history = MockHistory::new();
        history
            .expect_delete_clipboard_history_by_ids()
            .withf(|ids_arg| ids_arg == ids(&["a", "b"]).as_slice())
            .times(1)
            .returning(|_| Ok(()));

        let uc = DeleteHistoryEntries::new(Arc::new(history));
        uc.execute(&ids(&["a", "b"])).await.unwrap();
    }

    #[tokio::test]
    async fn empty_list_skips_the_backend() {
        let mut history = MockHistory::new();
        history.expect_delete_clipboard_history_by_ids().times(0);

        let uc = DeleteHistoryEntries::new(Arc::new(history));
        uc.execute(&[]).await.unwrap();
    }

    #[tokio::test]
    async fn backend_failure_carries_context() {
        let mut history = MockHistory::new();
        history
            .expect_delete_clipboard_history_by_ids()
            .returning(|_| Err(anyhow::anyhow!("db locked")));

        let uc = DeleteHistoryEntries::new(Arc::new(history));
        let err = uc.execute(&ids(&["a"])).await.unwrap_err();
        assert!(err.to_string().contains("Failed to delete 1 history entries"));
        assert!(format!("{err:#}").contains("db locked"));
    }
}
