use tracing::{debug, warn};

use cs_core::history::{EmptyState, HistoryEntry, PageRequest};
use cs_core::ids::HistoryId;
use cs_core::layout::{
    compute_window, needs_more_rows, scroll_offset_to_reveal, VisibleWindow, WindowRequest,
};
use cs_core::search::ListSource;
use cs_core::sequence::SequenceMode;

use super::HistoryPageController;
use crate::usecases::PageFetch;

/// Result of a keyboard cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorMove {
    pub index: usize,
    /// New scroll offset, when the row is not fully visible.
    pub scroll_to: Option<u64>,
}

impl HistoryPageController {
    /// Collection the list renders: search results while a search or filter
    /// is active, the loaded history otherwise.
    pub fn collection(&self) -> Vec<HistoryEntry> {
        let mut state = self.inner.lock_state();
        match self.inner.sync_source(&mut state) {
            ListSource::All => state.all.clone(),
            ListSource::Found => self.inner.search.results(),
        }
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        let mut state = self.inner.lock_state();
        let len = self.inner.rendered_len(&mut state);
        EmptyState::for_collection(state.source, len)
    }

    /// Rows to mount for the given viewport.
    pub fn window(&self, scroll_top: u64, viewport_height: u32) -> VisibleWindow {
        let mut state = self.inner.lock_state();
        let item_count = self.inner.rendered_len(&mut state);
        state.scroll_top = scroll_top;
        state.viewport_height = viewport_height;
        compute_window(
            &mut state.rows,
            WindowRequest {
                item_count,
                scroll_top,
                viewport_height,
                overscan: self.inner.config.overscan,
            },
        )
    }

    /// Recomputes the window and loads the next page when the last visible
    /// row is close to the end of the unfiltered collection.
    pub async fn on_scroll(&self, scroll_top: u64, viewport_height: u32) -> VisibleWindow {
        let window = self.window(scroll_top, viewport_height);
        if self.should_load_more(&window) {
            self.load_more().await;
        }
        window
    }

    fn should_load_more(&self, window: &VisibleWindow) -> bool {
        let state = self.inner.lock_state();
        if !state.source.paginates() || !state.has_more {
            return false;
        }
        window.last_visible_index().is_some_and(|last| {
            needs_more_rows(last, state.all.len(), self.inner.config.load_more_threshold)
        })
    }

    /// Fetches the next page. Returns whether new rows were appended.
    ///
    /// Overlapping calls are dropped. A failed fetch keeps the loaded rows
    /// and lets the next trigger retry.
    pub async fn load_more(&self) -> bool {
        let request = {
            let state = self.inner.lock_state();
            if !state.has_more {
                return false;
            }
            PageRequest {
                offset: state.all.len(),
                limit: self.inner.config.page_size,
                cancel_refetch: false,
            }
        };

        match self.inner.fetch_page.execute(request).await {
            Ok(PageFetch::Fetched(page)) => {
                let appended = {
                    let mut state = self.inner.lock_state();
                    let appended = state.append_page(page.entries, page.has_more);
                    debug!(appended, total = state.all.len(), "History page appended");
                    appended
                };
                if request.offset == 0 {
                    self.refresh_pinned().await;
                }
                appended > 0
            }
            Ok(PageFetch::Skipped) => false,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "Loading next history page failed");
                false
            }
        }
    }

    /// Replaces the loaded history, e.g. after the backend's own incremental
    /// refresh of the unfiltered collection.
    pub fn apply_history_snapshot(&self, entries: Vec<HistoryEntry>, has_more: bool) {
        let mut state = self.inner.lock_state();
        state.replace_all(entries, has_more);
        let len = self.inner.rendered_len(&mut state);
        state.cursor.clamp(len);
    }

    /// Records a measured row height; later offsets are recomputed lazily.
    pub fn report_row_height(&self, index: usize, height: u32) -> bool {
        self.inner.lock_state().rows.set(index, height)
    }

    /// Scroll offset that brings row `index` to the top. Indices past the
    /// end resolve to the end of the list.
    pub fn scroll_offset_for_index(&self, index: usize) -> u64 {
        let mut state = self.inner.lock_state();
        let len = self.inner.rendered_len(&mut state);
        state.rows.offset_of(index.min(len))
    }

    pub fn total_height(&self) -> u64 {
        let mut state = self.inner.lock_state();
        let len = self.inner.rendered_len(&mut state);
        state.rows.total_height(len)
    }

    pub fn cursor_down(&self) -> Option<CursorMove> {
        self.move_cursor(true)
    }

    pub fn cursor_up(&self) -> Option<CursorMove> {
        self.move_cursor(false)
    }

    pub fn cursor_index(&self) -> Option<usize> {
        self.inner.lock_state().cursor.index()
    }

    fn move_cursor(&self, down: bool) -> Option<CursorMove> {
        let mut state = self.inner.lock_state();
        let len = self.inner.rendered_len(&mut state);
        let index = if down {
            state.cursor.move_down(len)
        } else {
            state.cursor.move_up(len)
        }?;
        let (scroll_top, viewport) = (state.scroll_top, state.viewport_height);
        let scroll_to = scroll_offset_to_reveal(&mut state.rows, index, scroll_top, viewport);
        if let Some(offset) = scroll_to {
            state.scroll_top = offset;
        }
        Some(CursorMove { index, scroll_to })
    }

    pub fn toggle_selection(&self, history_id: &HistoryId) -> bool {
        self.inner.lock_state().selection.toggle(history_id)
    }

    pub fn is_selected(&self, history_id: &HistoryId) -> bool {
        self.inner.lock_state().selection.contains(history_id)
    }

    pub fn selection(&self) -> Vec<HistoryId> {
        self.inner.lock_state().selection.to_vec()
    }

    pub fn clear_selection(&self) {
        self.inner.lock_state().selection.clear();
    }

    /// Copies one entry to the OS clipboard and clears the selection.
    pub async fn copy_entry(&self, history_id: &HistoryId) -> bool {
        self.act_on_entry(history_id, SequenceMode::Copy).await
    }

    /// Pastes one entry into the focused application. The selection is
    /// cleared when auto-deselect is enabled.
    pub async fn paste_entry(&self, history_id: &HistoryId) -> bool {
        self.act_on_entry(history_id, SequenceMode::Paste).await
    }

    async fn act_on_entry(&self, history_id: &HistoryId, mode: SequenceMode) -> bool {
        match self.inner.copy.execute(history_id, mode).await {
            Ok(()) => {
                let mut state = self.inner.lock_state();
                let clears = match mode {
                    SequenceMode::Copy => {
                        state.copied_item = Some(history_id.clone());
                        true
                    }
                    SequenceMode::Paste => {
                        state.pasted_item = Some(history_id.clone());
                        self.inner.config.auto_deselect_after_paste
                    }
                };
                if clears {
                    state.selection.clear();
                }
                true
            }
            Err(err) => {
                self.inner
                    .report_failure(err, "Could not place the entry on the clipboard")
                    .await;
                false
            }
        }
    }

    /// Entry most recently copied from this page, for row feedback.
    pub fn copied_item(&self) -> Option<HistoryId> {
        self.inner.lock_state().copied_item.clone()
    }

    /// Entry most recently pasted from this page.
    pub fn pasted_item(&self) -> Option<HistoryId> {
        self.inner.lock_state().pasted_item.clone()
    }

    /// Deletes every selected entry.
    pub async fn delete_selected(&self) -> bool {
        let ids = self.selection();
        if ids.is_empty() {
            return false;
        }
        self.delete_entries(ids).await
    }

    pub(super) async fn delete_entries(&self, ids: Vec<HistoryId>) -> bool {
        match self.inner.delete.execute(&ids).await {
            Ok(()) => {
                {
                    let mut state = self.inner.lock_state();
                    state.remove_entries(&ids);
                    state.selection.clear();
                    let len = self.inner.rendered_len(&mut state);
                    state.cursor.clamp(len);
                }
                self.refresh_pinned().await;
                self.inner.search.refetch().await;
                true
            }
            Err(err) => {
                self.inner
                    .report_failure(err, "Could not delete the selected entries")
                    .await;
                false
            }
        }
    }

    /// Handles the backend's clipboard-changed notification.
    pub async fn on_clipboard_updated(&self) -> bool {
        self.inner.search.on_clipboard_updated().await
    }
}
