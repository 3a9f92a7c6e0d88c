use anyhow::Result;
use async_trait::async_trait;

use crate::history::{HistoryEntry, HistoryPage, PageRequest};
use crate::ids::{HistoryId, ItemId};
use crate::pinned::PinnedMove;
use crate::search::HistoryQuery;

/// History commands and queries served by the native backend.
///
/// 历史记录命令与查询（由原生后端提供）。
///
/// 约定：
/// - 所有命令都是幂等的 id 列表操作
/// - 分页结果按时间倒序
#[async_trait]
pub trait HistoryCommandPort: Send + Sync {
    async fn delete_clipboard_history_by_ids(&self, history_ids: &[HistoryId]) -> Result<()>;

    /// Pins (`is_pinned = true`) or unpins the entries. Newly pinned entries
    /// are appended to the end of the pinned order.
    async fn pinned_clipboard_history_by_ids(
        &self,
        history_ids: &[HistoryId],
        is_pinned: bool,
    ) -> Result<()>;

    async fn move_pinned_clipboard_history_up_down(&self, request: &PinnedMove) -> Result<()>;

    async fn unpin_all_clipboard_history(&self) -> Result<()>;

    /// Overwrites the value of board item `item_id` with the entry's value.
    async fn update_item_value_by_history_id(
        &self,
        history_id: &HistoryId,
        item_id: &ItemId,
    ) -> Result<()>;

    async fn fetch_next_clipboard_history_page(&self, request: PageRequest) -> Result<HistoryPage>;

    async fn find_clipboard_history(&self, query: &HistoryQuery) -> Result<Vec<HistoryEntry>>;
}
