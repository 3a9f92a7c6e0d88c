use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use cs_core::ids::HistoryId;
use cs_core::ports::ClipboardActionPort;
use cs_core::sequence::SequenceMode;

/// Puts one history entry on the OS clipboard, optionally pasting it.
/// 复制（或粘贴）单个历史条目。
pub struct CopyHistoryEntry {
    clipboard: Arc<dyn ClipboardActionPort>,
}

impl CopyHistoryEntry {
    pub fn new(clipboard: Arc<dyn ClipboardActionPort>) -> Self {
        Self { clipboard }
    }

    #[tracing::instrument(
        name = "usecase.copy_history_entry.execute",
        skip(self),
        fields(history_id = %history_id, mode = ?mode)
    )]
    pub async fn execute(&self, history_id: &HistoryId, mode: SequenceMode) -> Result<()> {
        match mode {
            SequenceMode::Copy => self
                .clipboard
                .set_copied_item(history_id)
                .await
                .with_context(|| format!("Failed to copy history entry {history_id}"))?,
            SequenceMode::Paste => self
                .clipboard
                .set_pasted_item(history_id)
                .await
                .with_context(|| format!("Failed to paste history entry {history_id}"))?,
        }
        info!("History entry placed on clipboard");
        Ok(())
    }
}
