use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::HistoryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceMode {
    #[default]
    Copy,
    Paste,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported sequence delay: {0}s (allowed: 1, 2, 3, 4, 5, 10)")]
pub struct SequenceDelayError(pub u64);

/// Delay between two sequence steps, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct SequenceDelay(u64);

impl SequenceDelay {
    pub const ALLOWED: [u64; 6] = [1, 2, 3, 4, 5, 10];

    pub fn secs(&self) -> u64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for SequenceDelay {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u64> for SequenceDelay {
    type Error = SequenceDelayError;

    fn try_from(secs: u64) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&secs) {
            Ok(Self(secs))
        } else {
            Err(SequenceDelayError(secs))
        }
    }
}

impl From<SequenceDelay> for u64 {
    fn from(delay: SequenceDelay) -> Self {
        delay.0
    }
}

/// One sequence run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequencePlan {
    pub ids: Vec<HistoryId>,
    pub delay: SequenceDelay,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub mode: SequenceMode,
}

impl SequencePlan {
    pub fn new(ids: Vec<HistoryId>, delay: SequenceDelay, reverse: bool, mode: SequenceMode) -> Self {
        Self {
            ids,
            delay,
            reverse,
            mode,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in acting order. `ids` itself is never reordered.
    pub fn ordered_ids(&self) -> Box<dyn Iterator<Item = &HistoryId> + '_> {
        if self.reverse {
            Box::new(self.ids.iter().rev())
        } else {
            Box::new(self.ids.iter())
        }
    }
}
