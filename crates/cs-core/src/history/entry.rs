use serde::{Deserialize, Serialize};

use crate::ids::HistoryId;

/// A captured clipboard history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub history_id: HistoryId,
    pub value: String,
    #[serde(default)]
    pub is_link: bool,
    #[serde(default)]
    pub is_image: bool,
    #[serde(default)]
    pub is_code: bool,
    /// Language the backend detected for code snippets.
    #[serde(default)]
    pub detected_language: Option<String>,
    /// Application the content was copied from, when known.
    #[serde(default)]
    pub copied_from_app: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    /// Present only when pinned; defines the pinned tray order.
    #[serde(default)]
    pub pinned_order_number: Option<u32>,
    /// Precomputed display hint, e.g. "5 minutes ago".
    #[serde(default)]
    pub time_ago: Option<String>,
    #[serde(default)]
    pub show_time_ago: bool,
}

impl HistoryEntry {
    /// Creates a plain-text entry captured at `created_at_ms`.
    pub fn text(history_id: HistoryId, value: impl Into<String>, created_at_ms: i64) -> Self {
        Self {
            history_id,
            value: value.into(),
            is_link: false,
            is_image: false,
            is_code: false,
            detected_language: None,
            copied_from_app: None,
            created_at_ms,
            updated_at_ms: created_at_ms,
            pinned_order_number: None,
            time_ago: None,
            show_time_ago: false,
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_order_number.is_some()
    }

    /// Plain text entries are everything that is not a link, an image or code.
    pub fn is_text(&self) -> bool {
        !self.is_link && !self.is_image && !self.is_code
    }

    pub fn with_pinned_order(mut self, order: u32) -> Self {
        self.pinned_order_number = Some(order);
        self
    }
}

/// Copies the pinned order numbers of `pinned` onto the matching entries in
/// `entries`, by `history_id`. Returns how many entries were updated.
pub fn sync_pinned_order(entries: &mut [HistoryEntry], pinned: &[HistoryEntry]) -> usize {
    let mut updated = 0;
    for source in pinned {
        if let Some(target) = entries
            .iter_mut()
            .find(|e| e.history_id == source.history_id)
        {
            if target.pinned_order_number != source.pinned_order_number {
                target.pinned_order_number = source.pinned_order_number;
                updated += 1;
            }
        }
    }
    updated
}
