//! Timed sequence copy/paste.

mod runner;

pub use runner::{SequenceHandle, SequenceReport, SequenceRunner};
