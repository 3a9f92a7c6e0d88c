//! In-process stand-in for the native history backend.

mod memory_backend;
mod query;
mod time_ago;

pub use memory_backend::{ClipboardActionRecord, InMemoryHistoryBackend};
pub use query::matches_query;
pub use time_ago::format_time_ago;
