use serde::{Deserialize, Serialize};

use crate::ids::HistoryId;

/// Insertion-ordered set of selected history entries.
///
/// 选中条目集合（保持插入顺序）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    ids: Vec<HistoryId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles `id` and returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &HistoryId) -> bool {
        if let Some(pos) = self.ids.iter().position(|selected| selected == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.clone());
            true
        }
    }

    pub fn contains(&self, id: &HistoryId) -> bool {
        self.ids.contains(id)
    }

    pub fn remove(&mut self, id: &HistoryId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|selected| selected != id);
        before != self.ids.len()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replaces the selection with `ids`, dropping duplicates.
    pub fn replace_with<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = HistoryId>,
    {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryId> {
        self.ids.iter()
    }

    pub fn to_vec(&self) -> Vec<HistoryId> {
        self.ids.clone()
    }

    /// Union of the dragged entry and the current selection, dragged id
    /// first, each id exactly once.
    pub fn with_dragged(&self, dragged: &HistoryId) -> Vec<HistoryId> {
        let mut ids = Vec::with_capacity(self.ids.len() + 1);
        ids.push(dragged.clone());
        ids.extend(self.ids.iter().filter(|id| *id != dragged).cloned());
        ids
    }
}
