//! Search and filter model for the history list.

mod filter;

pub use filter::{has_search_or_filter, ContentFilter, HistoryQuery, ListSource, SearchFilters};
