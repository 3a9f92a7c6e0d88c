use anyhow::Result;
use async_trait::async_trait;

use crate::ids::HistoryId;

/// Places history entries back on the OS clipboard.
///
/// 将历史条目写回系统剪切板。
#[async_trait]
pub trait ClipboardActionPort: Send + Sync {
    /// Copies the entry to the clipboard.
    async fn set_copied_item(&self, history_id: &HistoryId) -> Result<()>;

    /// Copies the entry and pastes it into the focused application.
    async fn set_pasted_item(&self, history_id: &HistoryId) -> Result<()>;
}
