use serde::{Deserialize, Serialize};

use crate::ids::HistoryId;

/// Countdown state published while a sequence runs.
///
/// 序列执行进度（倒计时）。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SequenceProgress {
    #[default]
    Idle,
    /// Step `step` (1-based) of `total` is being copied or pasted.
    Acting {
        step: usize,
        total: usize,
        history_id: HistoryId,
    },
    /// Seconds left before step `next_step`.
    Waiting {
        next_step: usize,
        total: usize,
        remaining_secs: u64,
    },
    Finished {
        total: usize,
        failed: usize,
    },
    Cancelled {
        completed: usize,
        total: usize,
    },
}

impl SequenceProgress {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Acting { .. } | Self::Waiting { .. })
    }

    /// Countdown value to render, if waiting.
    pub fn countdown(&self) -> Option<u64> {
        match self {
            Self::Waiting { remaining_secs, .. } => Some(*remaining_secs),
            _ => None,
        }
    }
}
