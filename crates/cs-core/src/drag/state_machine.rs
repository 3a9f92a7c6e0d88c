//! Drag session state machine.
//!
//! Pure transition function in the same shape as the other flow machines:
//! the caller feeds events and executes the returned actions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::target::{DragSourceId, DropTargetId};
use crate::history::SelectionSet;
use crate::ids::{BoardId, HistoryId, ItemId};

/// Time the settled drop stays visible before the session returns to idle.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(450);

const MIN_RESET_DELAY: Duration = Duration::from_millis(300);
const MAX_RESET_DELAY: Duration = Duration::from_millis(600);

pub fn clamp_reset_delay(delay: Duration) -> Duration {
    delay.clamp(MIN_RESET_DELAY, MAX_RESET_DELAY)
}

/// Transient data of an in-progress drag.
///
/// 拖拽会话数据。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveDrag {
    pub source: DragSourceId,
    /// Fixed at drag start.
    pub is_drag_pinned_history: bool,
    /// At most one hovered target, so the per-kind flags are exclusive.
    pub over: Option<DropTargetId>,
}

impl ActiveDrag {
    pub fn new(source: DragSourceId, from_pinned: bool) -> Self {
        Self {
            is_drag_pinned_history: from_pinned || source.is_pinned(),
            source,
            over: None,
        }
    }

    pub fn history_id(&self) -> &HistoryId {
        self.source.history_id()
    }

    pub fn drag_over_trash(&self) -> bool {
        matches!(self.over, Some(DropTargetId::Trash))
    }

    pub fn drag_over_pinned(&self) -> bool {
        matches!(self.over, Some(DropTargetId::PinnedZone))
    }

    pub fn drag_over_board(&self) -> bool {
        matches!(self.over, Some(DropTargetId::Board(_)))
    }

    pub fn drag_over_clip(&self) -> bool {
        matches!(self.over, Some(DropTargetId::ClipSlot(_)))
    }
}

/// Drag session state.
///
/// 拖拽会话状态。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
    /// Drop committed, waiting for the exit animation.
    Settling(ActiveDrag),
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        match self {
            Self::Idle => None,
            Self::Dragging(drag) | Self::Settling(drag) => Some(drag),
        }
    }
}

/// Events that drive the drag session.
///
/// 驱动拖拽会话的事件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragEvent {
    Start {
        source: DragSourceId,
        from_pinned: bool,
    },
    /// Result of drop-target resolution for the current tick.
    Over { target: Option<DropTargetId> },
    Cancel,
    /// Drop with the selection as it was at release time.
    Drop { selection: SelectionSet },
    ResetElapsed,
}

/// Draft handed to the board-creation flow when entries are dropped on a
/// board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardItemDraft {
    pub board_id: BoardId,
    pub history_ids: Vec<HistoryId>,
}

/// Side-effects produced by drag transitions.
///
/// 拖拽状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragAction {
    PinEntries { history_ids: Vec<HistoryId> },
    DeleteEntries { history_ids: Vec<HistoryId> },
    StageBoardItem(BoardItemDraft),
    OverwriteClip {
        item_id: ItemId,
        history_id: HistoryId,
    },
    ScheduleReset { delay: Duration },
}

impl DragAction {
    /// Whether the action changes backend or staged state.
    pub fn is_commit(&self) -> bool {
        !matches!(self, Self::ScheduleReset { .. })
    }

    /// Whether the selection is cleared once the action succeeds.
    pub fn clears_selection(&self) -> bool {
        matches!(
            self,
            Self::PinEntries { .. } | Self::DeleteEntries { .. } | Self::StageBoardItem(_)
        )
    }
}

/// Pure drag session state machine.
///
/// 纯状态机：不包含副作用。
#[derive(Debug, Clone, Copy)]
pub struct DragStateMachine {
    reset_delay: Duration,
}

impl Default for DragStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_RESET_DELAY)
    }
}

impl DragStateMachine {
    pub fn new(reset_delay: Duration) -> Self {
        Self {
            reset_delay: clamp_reset_delay(reset_delay),
        }
    }

    pub fn reset_delay(&self) -> Duration {
        self.reset_delay
    }

    pub fn transition(&self, state: DragState, event: DragEvent) -> (DragState, Vec<DragAction>) {
        match (state, event) {
            (_, DragEvent::Cancel) => (DragState::Idle, Vec::new()),

            (DragState::Idle | DragState::Settling(_), DragEvent::Start { source, from_pinned }) => {
                (DragState::Dragging(ActiveDrag::new(source, from_pinned)), Vec::new())
            }

            (DragState::Dragging(mut drag), DragEvent::Over { target }) => {
                drag.over = target;
                (DragState::Dragging(drag), Vec::new())
            }

            (DragState::Dragging(drag), DragEvent::Drop { selection }) => {
                match Self::commit_effect(&drag, &selection) {
                    Some(action) => (
                        DragState::Settling(drag),
                        vec![
                            action,
                            DragAction::ScheduleReset {
                                delay: self.reset_delay,
                            },
                        ],
                    ),
                    None => (DragState::Idle, Vec::new()),
                }
            }

            (DragState::Settling(_), DragEvent::ResetElapsed) => (DragState::Idle, Vec::new()),

            (state, _) => (state, Vec::new()),
        }
    }

    fn commit_effect(drag: &ActiveDrag, selection: &SelectionSet) -> Option<DragAction> {
        let dragged = drag.history_id();
        let with_selection = || selection.with_dragged(dragged);

        match drag.over.as_ref()? {
            DropTargetId::PinnedZone if drag.is_drag_pinned_history => None,
            DropTargetId::PinnedZone => Some(DragAction::PinEntries {
                history_ids: with_selection(),
            }),
            DropTargetId::Trash => Some(DragAction::DeleteEntries {
                history_ids: with_selection(),
            }),
            DropTargetId::Board(board_id) => Some(DragAction::StageBoardItem(BoardItemDraft {
                board_id: board_id.clone(),
                history_ids: with_selection(),
            })),
            DropTargetId::ClipSlot(item_id) => Some(DragAction::OverwriteClip {
                item_id: item_id.clone(),
                history_id: dragged.clone(),
            }),
        }
    }
}
