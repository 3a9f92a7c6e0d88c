use tracing::{debug, warn};

use cs_core::history::HistoryEntry;
use cs_core::ids::HistoryId;
use cs_core::pinned::MoveDirection;
use cs_core::search::HistoryQuery;
use cs_core::sequence::{SequenceMode, SequencePlan};

use super::HistoryPageController;
use crate::sequence::SequenceHandle;

impl HistoryPageController {
    pub fn pinned_entries(&self) -> Vec<HistoryEntry> {
        self.inner.lock_state().tray.entries().to_vec()
    }

    /// Reloads every pinned entry from the backend. On failure the tray
    /// keeps its current content.
    pub async fn refresh_pinned(&self) -> bool {
        match self.inner.find_pinned.execute(&HistoryQuery::pinned()).await {
            Ok(pinned) => {
                let mut state = self.inner.lock_state();
                state.set_pinned(pinned);
                debug!(pinned = state.tray.len(), "Pinned tray refreshed");
                true
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "Refreshing pinned entries failed");
                false
            }
        }
    }

    pub fn tray_collapsed(&self) -> bool {
        self.inner.lock_state().tray.collapsed()
    }

    pub fn tray_controls_visible(&self) -> bool {
        self.inner.lock_state().tray.controls_visible()
    }

    /// Empty trays render as a drop placeholder.
    pub fn tray_is_drop_placeholder(&self) -> bool {
        self.inner.lock_state().tray.is_drop_placeholder()
    }

    pub fn set_tray_hovered(&self, hovered: bool) {
        self.inner.lock_state().tray.set_hovered(hovered);
    }

    /// Open-change callback of the tray's dropdown menus.
    pub fn on_tray_menu_open_change(&self, open: bool) {
        self.inner.lock_state().tray.on_open_change(open);
    }

    /// Collapses or expands the tray and persists the choice. Collapsing
    /// abandons a running sequence.
    pub async fn set_tray_collapsed(&self, collapsed: bool) {
        self.inner.lock_state().tray.set_collapsed(collapsed);
        if collapsed {
            self.inner.sequence.cancel();
        }
        if let Err(err) = self.inner.save_tray_collapsed.execute(collapsed).await {
            warn!(error = %format!("{err:#}"), "Saving tray state failed");
        }
    }

    pub async fn toggle_tray_collapsed(&self) -> bool {
        let collapsed = !self.tray_collapsed();
        self.set_tray_collapsed(collapsed).await;
        collapsed
    }

    /// Replaces the selection with every pinned entry.
    pub fn select_all_pinned(&self) -> usize {
        let mut state = self.inner.lock_state();
        let ids = state.tray.ids();
        state.selection.replace_with(ids);
        state.selection.len()
    }

    /// Swaps a pinned entry with its neighbor locally, then asks the backend
    /// to do the same. The local swap is reverted if the backend fails.
    pub async fn move_pinned(&self, history_id: &HistoryId, direction: MoveDirection) -> bool {
        let swap = {
            let mut state = self.inner.lock_state();
            let Some(swap) = state.tray.apply_move(history_id, direction) else {
                debug!(history_id = %history_id, ?direction, "Pinned move out of range ignored");
                return false;
            };
            state.sync_order_from_tray();
            swap
        };

        match self.inner.move_pinned.execute(&swap.moved).await {
            Ok(()) => {
                self.refresh_pinned().await;
                true
            }
            Err(err) => {
                {
                    let mut state = self.inner.lock_state();
                    if state.tray.revert(&swap) {
                        state.sync_order_from_tray();
                    }
                }
                self.inner
                    .report_failure(err, "Could not reorder pinned entries")
                    .await;
                false
            }
        }
    }

    /// Clears the tray right away and restores it if the backend fails.
    pub async fn unpin_all(&self) -> bool {
        let previous = {
            let mut state = self.inner.lock_state();
            if state.tray.is_empty() {
                return false;
            }
            state.clear_pinned();
            state.tray.take_entries()
        };

        match self.inner.unpin_all.execute().await {
            Ok(()) => {
                self.refresh_pinned().await;
                self.inner.search.refetch().await;
                true
            }
            Err(err) => {
                {
                    let mut state = self.inner.lock_state();
                    state.tray.restore(previous);
                    state.sync_order_from_tray();
                }
                self.inner
                    .report_failure(err, "Could not unpin entries")
                    .await;
                false
            }
        }
    }

    /// Runs a sequence over the pinned tray in display order, using the
    /// configured delay and direction.
    pub fn start_pinned_sequence(&self, mode: SequenceMode) -> Option<SequenceHandle> {
        let ids = self.inner.lock_state().tray.ids();
        if ids.is_empty() {
            return None;
        }
        let config = &self.inner.config;
        Some(self.start_sequence(SequencePlan::new(
            ids,
            config.sequence_delay,
            config.sequence_reverse,
            mode,
        )))
    }

    pub fn start_sequence(&self, plan: SequencePlan) -> SequenceHandle {
        self.inner.sequence.start(plan)
    }

    pub fn cancel_sequence(&self) -> bool {
        self.inner.sequence.cancel()
    }
}
