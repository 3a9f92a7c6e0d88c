//! ID type wrappers for type safety.

mod board;
mod history;
mod id_macro;

pub use board::{BoardId, ItemId};
pub use history::HistoryId;
