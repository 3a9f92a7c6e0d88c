use async_trait::async_trait;
use mockall::mock;

use cs_core::history::{HistoryEntry, HistoryPage, PageRequest};
use cs_core::ids::{HistoryId, ItemId};
use cs_core::pinned::PinnedMove;
use cs_core::ports::HistoryCommandPort;
use cs_core::search::HistoryQuery;

mock! {
    pub History {}

    #[async_trait]
    impl HistoryCommandPort for History {
        async fn delete_clipboard_history_by_ids(&self, history_ids: &[HistoryId]) -> anyhow::Result<()>;
        async fn pinned_clipboard_history_by_ids(
            &self,
            history_ids: &[HistoryId],
            is_pinned: bool,
        ) -> anyhow::Result<()>;
        async fn move_pinned_clipboard_history_up_down(&self, request: &PinnedMove) -> anyhow::Result<()>;
        async fn unpin_all_clipboard_history(&self) -> anyhow::Result<()>;
        async fn update_item_value_by_history_id(
            &self,
            history_id: &HistoryId,
            item_id: &ItemId,
        ) -> anyhow::Result<()>;
        async fn fetch_next_clipboard_history_page(&self, request: PageRequest) -> anyhow::Result<HistoryPage>;
        async fn find_clipboard_history(&self, query: &HistoryQuery) -> anyhow::Result<Vec<HistoryEntry>>;
    }
}

pub(crate) fn ids(values: &[&str]) -> Vec<HistoryId> {
    values.iter().map(|v| HistoryId::from(*v)).collect()
}
