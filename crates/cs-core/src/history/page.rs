use serde::{Deserialize, Serialize};

use super::HistoryEntry;

/// Request for the next page of the unfiltered history collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Number of entries already loaded; the page starts here.
    pub offset: usize,
    pub limit: usize,
    /// Whether an outstanding backend refetch may be cancelled in favor of this one.
    pub cancel_refetch: bool,
}

/// One page of history entries, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub entries: Vec<HistoryEntry>,
    pub has_more: bool,
}
