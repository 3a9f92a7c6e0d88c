use serde::{Deserialize, Serialize};

use crate::sequence::SequenceDelay;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Tuning of the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub page_size: usize,
    /// Height assumed for rows that have not been measured yet, in pixels.
    pub default_row_height: u32,
    pub overscan: usize,
    /// Distance from the end of the loaded rows, in rows, that triggers the
    /// next page.
    pub load_more_threshold: usize,
    pub search_debounce_ms: u64,
    /// Clamped to 300..=600 when applied.
    pub drag_reset_delay_ms: u64,
    /// Refetch search results when the OS clipboard changes.
    pub auto_update_on_capture: bool,
    pub auto_deselect_after_paste: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceSettings {
    pub delay: SequenceDelay,
    pub reverse: bool,
}

/// UI store for the pinned tray.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraySettings {
    /// 置顶托盘是否折叠
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub history: HistorySettings,

    #[serde(default)]
    pub sequence: SequenceSettings,

    #[serde(default)]
    pub tray: TraySettings,
}

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}
