use std::time::Duration;

use cs_core::drag::clamp_reset_delay;
use cs_core::sequence::SequenceDelay;
use cs_core::settings::Settings;

/// Runtime tuning of [`super::HistoryPageController`].
///
/// 历史列表控制器配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub page_size: usize,
    pub default_row_height: u32,
    pub overscan: usize,
    pub load_more_threshold: usize,
    pub search_debounce: Duration,
    pub drag_reset_delay: Duration,
    pub auto_update_on_capture: bool,
    pub auto_deselect_after_paste: bool,
    pub sequence_delay: SequenceDelay,
    pub sequence_reverse: bool,
    pub tray_collapsed: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl ControllerConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        let history = &settings.history;
        Self {
            page_size: history.page_size.max(1),
            default_row_height: history.default_row_height.max(1),
            overscan: history.overscan,
            load_more_threshold: history.load_more_threshold,
            search_debounce: Duration::from_millis(history.search_debounce_ms),
            drag_reset_delay: clamp_reset_delay(Duration::from_millis(history.drag_reset_delay_ms)),
            auto_update_on_capture: history.auto_update_on_capture,
            auto_deselect_after_paste: history.auto_deselect_after_paste,
            sequence_delay: settings.sequence.delay,
            sequence_reverse: settings.sequence.reverse,
            tray_collapsed: settings.tray.collapsed,
        }
    }
}
