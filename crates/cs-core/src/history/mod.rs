//! Clipboard history domain models.
//!
//! The backend owns every [`HistoryEntry`]; the UI core only reads them
//! within a render pass and reconciles local copies after mutations.

mod entry;
mod event;
mod page;
mod selection;

pub use entry::{sync_pinned_order, HistoryEntry};
pub use event::{HistoryEvent, CLIPBOARD_MONITOR_UPDATE};
pub use page::{HistoryPage, PageRequest};
pub use selection::SelectionSet;

use serde::{Deserialize, Serialize};

use crate::search::ListSource;

/// Placeholder rendered in place of the list when the collection is empty.
///
/// 列表为空时显示的占位状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// A search or filter is active and matched nothing.
    NoResults,
    /// There is no clipboard history at all.
    NoHistory,
}

impl EmptyState {
    /// Returns the placeholder for a collection of `len` rows shown from `source`.
    pub fn for_collection(source: ListSource, len: usize) -> Option<Self> {
        if len > 0 {
            return None;
        }
        Some(match source {
            ListSource::Found => Self::NoResults,
            ListSource::All => Self::NoHistory,
        })
    }
}
