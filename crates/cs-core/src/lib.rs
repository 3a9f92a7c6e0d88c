//! # cs-core
//!
//! Domain models and pure state logic for the ClipShelf history list.
//!
//! Nothing in this crate performs I/O. Backend access goes through the
//! traits in [`ports`]; timing and concurrency live in `cs-app`.

pub mod config;
pub mod drag;
pub mod history;
pub mod ids;
pub mod layout;
pub mod pinned;
pub mod ports;
pub mod search;
pub mod sequence;
pub mod settings;

pub use config::AppConfig;
pub use history::{HistoryEntry, HistoryEvent, SelectionSet};
pub use ids::{BoardId, HistoryId, ItemId};
pub use settings::Settings;
