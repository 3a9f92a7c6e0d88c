//! ClipShelf application orchestration layer
//!
//! Use cases drive the backend ports; [`controller::HistoryPageController`]
//! owns all transient list state and is the single entry point for the view.

pub mod controller;
pub mod deps;
pub mod events;
pub mod search;
pub mod sequence;
pub mod usecases;

pub use controller::{ControllerConfig, DropOutcome, HistoryPageController};
pub use deps::HistoryDeps;
pub use search::SearchCoordinator;
pub use sequence::{SequenceHandle, SequenceReport, SequenceRunner};
