use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;
use crate::ids::HistoryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Backend request to move one pinned entry by one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedMove {
    pub history_id: HistoryId,
    pub direction: MoveDirection,
}

/// A locally applied swap, kept so it can be reverted if the backend
/// rejects the move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedSwap {
    pub moved: PinnedMove,
    pub displaced: HistoryId,
}

/// Pinned entries shown above the list, ordered by `pinned_order_number`.
///
/// 置顶条目托盘。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinnedTray {
    entries: Vec<HistoryEntry>,
    collapsed: bool,
    hovered: bool,
    keep_open: bool,
}

impl PinnedTray {
    pub fn new(collapsed: bool) -> Self {
        Self {
            collapsed,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn ids(&self) -> Vec<HistoryId> {
        self.entries.iter().map(|e| e.history_id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &HistoryId) -> bool {
        self.entries.iter().any(|e| &e.history_id == id)
    }

    /// Rebuilds the tray from the pinned entries of `all`.
    pub fn sync(&mut self, all: &[HistoryEntry]) {
        let mut pinned: Vec<HistoryEntry> = all.iter().filter(|e| e.is_pinned()).cloned().collect();
        pinned.sort_by_key(|e| e.pinned_order_number);
        self.entries = pinned;
        if self.entries.is_empty() {
            self.reset_flags();
        }
    }

    /// Folds freshly loaded entries into the tray: pinned ones are inserted
    /// or updated, unpinned ones are dropped. Entries not in `entries` are
    /// left alone, so a partially loaded history never shrinks the tray.
    pub fn reconcile(&mut self, entries: &[HistoryEntry]) {
        for entry in entries {
            match (self.position(&entry.history_id), entry.is_pinned()) {
                (Some(index), true) => self.entries[index] = entry.clone(),
                (Some(index), false) => {
                    self.entries.remove(index);
                }
                (None, true) => self.entries.push(entry.clone()),
                (None, false) => {}
            }
        }
        self.entries.sort_by_key(|e| e.pinned_order_number);
        if self.entries.is_empty() {
            self.reset_flags();
        }
    }

    /// Drops deleted entries from the tray.
    pub fn remove(&mut self, ids: &[HistoryId]) {
        self.entries.retain(|e| !ids.contains(&e.history_id));
        if self.entries.is_empty() {
            self.reset_flags();
        }
    }

    /// Highest order number in the tray.
    pub fn max_order(&self) -> Option<u32> {
        self.entries.iter().filter_map(|e| e.pinned_order_number).max()
    }

    /// Swaps the entry with its neighbor in `direction`, together with their
    /// order numbers. Moving past either end returns `None` and changes nothing.
    pub fn apply_move(&mut self, history_id: &HistoryId, direction: MoveDirection) -> Option<PinnedSwap> {
        let index = self.position(history_id)?;
        let neighbor = match direction {
            MoveDirection::Up => index.checked_sub(1)?,
            MoveDirection::Down => Some(index + 1).filter(|n| *n < self.entries.len())?,
        };
        self.swap(index, neighbor);
        Some(PinnedSwap {
            moved: PinnedMove {
                history_id: history_id.clone(),
                direction,
            },
            displaced: self.entries[index].history_id.clone(),
        })
    }

    /// Undoes a swap made by [`PinnedTray::apply_move`]. Returns false if
    /// either entry is gone.
    pub fn revert(&mut self, swap: &PinnedSwap) -> bool {
        match (self.position(&swap.moved.history_id), self.position(&swap.displaced)) {
            (Some(a), Some(b)) => {
                self.swap(a, b);
                true
            }
            _ => false,
        }
    }

    /// Empties the tray and hands back the previous entries for rollback.
    pub fn take_entries(&mut self) -> Vec<HistoryEntry> {
        let entries = std::mem::take(&mut self.entries);
        self.reset_flags();
        entries
    }

    pub fn restore(&mut self, entries: Vec<HistoryEntry>) {
        self.entries = entries;
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn keep_open(&self) -> bool {
        self.keep_open
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Open-change callback of the tray's action menu; the only way
    /// `keep_open` changes besides the tray emptying.
    pub fn on_open_change(&mut self, open: bool) {
        self.keep_open = open;
    }

    pub fn controls_visible(&self) -> bool {
        self.hovered || self.keep_open
    }

    /// An empty tray still renders as a drop target placeholder.
    pub fn is_drop_placeholder(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: &HistoryId) -> Option<usize> {
        self.entries.iter().position(|e| &e.history_id == id)
    }

    fn swap(&mut self, a: usize, b: usize) {
        let order_a = self.entries[a].pinned_order_number;
        self.entries[a].pinned_order_number = self.entries[b].pinned_order_number;
        self.entries[b].pinned_order_number = order_a;
        self.entries.swap(a, b);
    }

    fn reset_flags(&mut self) {
        self.hovered = false;
        self.keep_open = false;
    }
}
