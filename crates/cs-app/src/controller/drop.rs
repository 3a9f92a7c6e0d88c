use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use cs_core::drag::{
    BoardItemDraft, DragAction, DragEvent, DragSourceId, DragState, DropTargetId, Droppable, Point,
    Rect,
};
use cs_core::ids::{HistoryId, ItemId};

use super::{ControllerInner, HistoryPageController};

/// What a drag end did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// No target, a pinned entry dropped on the pinned zone, or a clip drop
    /// whose entry is gone.
    NoEffect,
    Committed(DragAction),
    /// The backend rejected the effect; the user was notified.
    Failed(DragAction),
}

impl HistoryPageController {
    /// Registers (or moves) a drop region.
    pub fn register_drop_target(&self, droppable: Droppable) {
        self.inner.lock_state().registry.register(droppable);
    }

    pub fn unregister_drop_target(&self, id: &DropTargetId) -> bool {
        self.inner.lock_state().registry.unregister(id)
    }

    pub fn drag_state(&self) -> DragState {
        self.inner.lock_state().drag.clone()
    }

    pub fn drag_start(&self, source: DragSourceId) {
        let from_pinned = source.is_pinned();
        if let Some(pending) = self.inner.lock_reset_timer().take() {
            pending.abort();
        }
        let mut state = self.inner.lock_state();
        state.resolver.reset();
        self.inner
            .apply_drag_event(&mut state, DragEvent::Start { source, from_pinned });
    }

    /// Resolves the hovered target for this drag-over tick. `pointer` is
    /// `None` for keyboard-driven drags.
    pub fn drag_move(&self, pointer: Option<Point>, dragged: Rect) -> Option<DropTargetId> {
        let mut state = self.inner.lock_state();
        if !state.drag.is_dragging() {
            return None;
        }
        let state = &mut *state;
        let target = state.resolver.resolve(&state.registry, pointer, dragged);
        self.inner.apply_drag_event(
            state,
            DragEvent::Over {
                target: target.clone(),
            },
        );
        target
    }

    /// Abandons the drag. Safe to call when no drag is active.
    pub fn drag_cancel(&self) {
        let mut state = self.inner.lock_state();
        state.resolver.reset();
        self.inner.apply_drag_event(&mut state, DragEvent::Cancel);
    }

    /// Commits the drop on the hovered target, then schedules the visual
    /// reset. A target unregistered since the last move commits nothing.
    pub async fn drag_end(&self) -> DropOutcome {
        let actions = {
            let mut state = self.inner.lock_state();
            let stale = state
                .drag
                .active()
                .and_then(|drag| drag.over.as_ref())
                .filter(|target| !state.registry.contains(target))
                .cloned();
            if let Some(target) = stale {
                debug!(target_id = %target, "Hovered drop target unregistered before release");
                self.inner
                    .apply_drag_event(&mut state, DragEvent::Over { target: None });
            }
            let selection = state.selection.clone();
            state.resolver.reset();
            self.inner
                .apply_drag_event(&mut state, DragEvent::Drop { selection })
        };

        let mut outcome = DropOutcome::NoEffect;
        for action in actions {
            match action {
                DragAction::ScheduleReset { delay } => self.schedule_reset(delay),
                commit => outcome = self.commit(commit).await,
            }
        }
        outcome
    }

    /// Board draft staged by the last drop on a board, for the board
    /// creation flow.
    pub fn take_staged_board_item(&self) -> Option<BoardItemDraft> {
        self.inner.lock_state().staged_board_item.take()
    }

    async fn commit(&self, action: DragAction) -> DropOutcome {
        match &action {
            DragAction::PinEntries { history_ids } => {
                match self.inner.pin.execute(history_ids, true).await {
                    Ok(()) => {
                        {
                            let mut state = self.inner.lock_state();
                            state.mark_pinned(history_ids);
                            state.selection.clear();
                        }
                        self.refresh_pinned().await;
                        self.inner.search.refetch().await;
                        DropOutcome::Committed(action)
                    }
                    Err(err) => {
                        self.inner
                            .report_failure(err, "Could not pin the dropped entries")
                            .await;
                        DropOutcome::Failed(action)
                    }
                }
            }
            DragAction::DeleteEntries { history_ids } => {
                if self.delete_entries(history_ids.clone()).await {
                    DropOutcome::Committed(action)
                } else {
                    DropOutcome::Failed(action)
                }
            }
            DragAction::StageBoardItem(draft) => {
                let mut state = self.inner.lock_state();
                info!(board_id = %draft.board_id, count = draft.history_ids.len(), "Board item staged from history");
                state.staged_board_item = Some(draft.clone());
                state.selection.clear();
                DropOutcome::Committed(action)
            }
            DragAction::OverwriteClip {
                item_id,
                history_id,
            } => self.overwrite_clip(action.clone(), history_id, item_id).await,
            DragAction::ScheduleReset { .. } => DropOutcome::NoEffect,
        }
    }

    async fn overwrite_clip(&self, action: DragAction, history_id: &HistoryId, item_id: &ItemId) -> DropOutcome {
        let known = {
            let state = self.inner.lock_state();
            let found = self.inner.search.results();
            state.find_entry(&found, history_id).is_some()
        };
        if !known {
            debug!(history_id = %history_id, item_id = %item_id, "Dragged entry no longer loaded, clip drop ignored");
            return DropOutcome::NoEffect;
        }

        match self.inner.update_board_item.execute(history_id, item_id).await {
            Ok(()) => DropOutcome::Committed(action),
            Err(err) => {
                self.inner
                    .report_failure(err, "Could not update the board item")
                    .await;
                DropOutcome::Failed(action)
            }
        }
    }

    fn schedule_reset(&self, delay: Duration) {
        let inner = Arc::clone(&self.inner);
        let mut timer = self.inner.lock_reset_timer();
        if let Some(previous) = timer.take() {
            previous.abort();
        }
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = inner.lock_state();
            inner.apply_drag_event(&mut state, DragEvent::ResetElapsed);
        });
        *timer = Some(task.abort_handle());
    }
}

impl ControllerInner {
    fn apply_drag_event(&self, state: &mut super::PageState, event: DragEvent) -> Vec<DragAction> {
        let current = std::mem::take(&mut state.drag);
        let (next, actions) = self.drag_machine.transition(current, event);
        state.drag = next;
        actions
    }
}
