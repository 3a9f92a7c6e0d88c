//! History list use cases
//! 历史列表用例
//!
//! Each use case wraps one backend command with logging and error context.
//! Local reconciliation (rollback, selection clearing, toasts) is the
//! controller's job.

pub mod copy_history_entry;
pub mod delete_history_entries;
pub mod fetch_history_page;
pub mod find_clipboard_history;
pub mod move_pinned_entry;
pub mod pin_history_entries;
pub mod settings;
pub mod unpin_all_history;
pub mod update_board_item;

#[cfg(test)]
pub(crate) mod test_support;

pub use copy_history_entry::CopyHistoryEntry;
pub use delete_history_entries::DeleteHistoryEntries;
pub use fetch_history_page::{FetchNextHistoryPage, PageFetch};
pub use find_clipboard_history::FindClipboardHistory;
pub use move_pinned_entry::MovePinnedEntry;
pub use pin_history_entries::PinHistoryEntries;
pub use settings::{GetSettings, UpdateTrayCollapsed};
pub use unpin_all_history::UnpinAllHistory;
pub use update_board_item::UpdateBoardItemFromHistory;
