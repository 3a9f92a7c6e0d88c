//! # History list dependencies / 历史列表依赖
//!
//! Parameter grouping for [`crate::HistoryPageController`] construction.
//! **Not a Builder**: no defaults, no hidden logic.

use std::sync::Arc;

use cs_core::ports::{ClipboardActionPort, HistoryCommandPort, NotificationPort, SettingsPort};

/// All dependencies are required.
/// 所有依赖都是必需的。
#[derive(Clone)]
pub struct HistoryDeps {
    pub history: Arc<dyn HistoryCommandPort>,
    pub clipboard: Arc<dyn ClipboardActionPort>,
    pub notifier: Arc<dyn NotificationPort>,
    pub settings: Arc<dyn SettingsPort>,
}
