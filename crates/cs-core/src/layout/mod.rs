//! Virtualization math for the history list.
//!
//! Rows have content-dependent heights that are only known after layout, so
//! the list keeps a [`RowHeightCache`] of measured heights and derives
//! cumulative offsets from it. [`compute_window`] then picks the rows that
//! intersect the viewport.

mod cursor;
mod row_heights;
mod window;

pub use cursor::KeyboardCursor;
pub use row_heights::{RowHeightCache, DEFAULT_ROW_HEIGHT};
pub use window::{
    compute_window, needs_more_rows, scroll_offset_to_reveal, VisibleRow, VisibleWindow,
    WindowRequest,
};
