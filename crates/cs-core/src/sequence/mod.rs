//! Sequence copy/paste model.
//!
//! Acts on a list of history entries one at a time with a fixed delay
//! between steps. The runner lives in the application layer.

mod plan;
mod progress;

pub use plan::{SequenceDelay, SequenceDelayError, SequenceMode, SequencePlan};
pub use progress::SequenceProgress;
