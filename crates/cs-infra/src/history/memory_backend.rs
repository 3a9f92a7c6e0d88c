use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use cs_core::history::{HistoryEntry, HistoryEvent, HistoryPage, PageRequest};
use cs_core::ids::{HistoryId, ItemId};
use cs_core::pinned::{MoveDirection, PinnedMove};
use cs_core::ports::{ClipboardActionPort, ClockPort, HistoryCommandPort};
use cs_core::search::HistoryQuery;

use super::query::matches_query;
use super::time_ago::format_time_ago;

const EVENT_BUFFER: usize = 32;
const CAPTURE_SENTINEL: &str = "update";

#[derive(Debug, thiserror::Error)]
pub enum HistoryBackendError {
    #[error("history entry not found: {0}")]
    EntryNotFound(HistoryId),
    #[error("history entry is not pinned: {0}")]
    NotPinned(HistoryId),
    #[error("pinned entry {0} cannot move {1:?}: already at the edge")]
    AtEdge(HistoryId, MoveDirection),
    #[error("board item not found: {0}")]
    BoardItemNotFound(ItemId),
}

/// What the clipboard action port was asked to do, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardActionRecord {
    Copied(HistoryId),
    Pasted(HistoryId),
}

#[derive(Default)]
struct BackendState {
    /// Newest first.
    entries: Vec<HistoryEntry>,
    board_items: HashMap<ItemId, String>,
    clipboard: Option<String>,
    actions: Vec<ClipboardActionRecord>,
    subscribers: Vec<mpsc::Sender<HistoryEvent>>,
    next_id: u64,
}

impl BackendState {
    fn position(&self, id: &HistoryId) -> Option<usize> {
        self.entries.iter().position(|e| &e.history_id == id)
    }

    fn entry(&self, id: &HistoryId) -> Result<&HistoryEntry, HistoryBackendError> {
        self.entries
            .iter()
            .find(|e| &e.history_id == id)
            .ok_or_else(|| HistoryBackendError::EntryNotFound(id.clone()))
    }

    fn next_pinned_order(&self) -> u32 {
        self.entries
            .iter()
            .filter_map(|e| e.pinned_order_number)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Pinned entries sorted by their order number.
    fn pinned_ids(&self) -> Vec<HistoryId> {
        let mut pinned: Vec<&HistoryEntry> = self.entries.iter().filter(|e| e.is_pinned()).collect();
        pinned.sort_by_key(|e| e.pinned_order_number);
        pinned.into_iter().map(|e| e.history_id.clone()).collect()
    }

    /// Compacts pinned order numbers to `0..n` keeping their relative order.
    fn renumber_pinned(&mut self) {
        for (order, id) in self.pinned_ids().into_iter().enumerate() {
            if let Some(pos) = self.position(&id) {
                self.entries[pos].pinned_order_number = Some(order as u32);
            }
        }
    }

    fn allocate_id(&mut self) -> HistoryId {
        self.next_id += 1;
        HistoryId::from(format!("h{}", self.next_id))
    }

    fn with_display_hint(&self, entry: &HistoryEntry, now_ms: i64) -> HistoryEntry {
        let mut entry = entry.clone();
        entry.time_ago = Some(format_time_ago(entry.created_at_ms, now_ms));
        entry.show_time_ago = true;
        entry
    }
}

/// In-process history backend.
///
/// Serves the history commands and clipboard actions from memory, emits
/// `clipboard-monitor/update` events on [`InMemoryHistoryBackend::capture`],
/// and records every copy/paste so callers can inspect them.
///
/// 内存中的历史记录后端（用于探针与测试）。
pub struct InMemoryHistoryBackend {
    clock: Arc<dyn ClockPort>,
    state: Mutex<BackendState>,
}

impl InMemoryHistoryBackend {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            clock,
            state: Mutex::new(BackendState::default()),
        }
    }

    /// Replaces the stored entries. `entries` must be newest first.
    pub fn with_entries(self, entries: Vec<HistoryEntry>) -> Self {
        self.lock().entries = entries;
        self
    }

    /// Generates `count` plain-text entries one minute apart, newest first.
    pub fn seed(self, count: usize) -> Self {
        let now = self.clock.now_ms();
        {
            let mut state = self.lock();
            for n in (0..count).rev() {
                let id = state.allocate_id();
                let created = now - (n as i64) * 60_000;
                let entry = HistoryEntry::text(id, format!("clip #{}", count - n), created);
                state.entries.insert(0, entry);
            }
        }
        debug!(count, "seeded history backend");
        self
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records a new clipboard capture as the newest entry and notifies
    /// subscribers. Returns the new entry's id.
    pub fn capture(&self, value: impl Into<String>) -> HistoryId {
        let now = self.clock.now_ms();
        let mut state = self.lock();
        let id = state.allocate_id();
        let value = value.into();
        state.entries.insert(0, HistoryEntry::text(id.clone(), value.clone(), now));
        state.clipboard = Some(value);

        let event = HistoryEvent::ClipboardMonitorUpdate {
            payload: CAPTURE_SENTINEL.to_string(),
        };
        state.subscribers.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("history event subscriber is lagging, dropping event");
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });
        id
    }

    /// Subscribes to backend events.
    pub fn subscribe(&self) -> mpsc::Receiver<HistoryEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        self.lock().subscribers.push(tx);
        rx
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.lock().entries.clone()
    }

    pub fn clipboard(&self) -> Option<String> {
        self.lock().clipboard.clone()
    }

    pub fn actions(&self) -> Vec<ClipboardActionRecord> {
        self.lock().actions.clone()
    }

    pub fn board_item(&self, item_id: &ItemId) -> Option<String> {
        self.lock().board_items.get(item_id).cloned()
    }

    pub fn set_board_item(&self, item_id: ItemId, value: impl Into<String>) {
        self.lock().board_items.insert(item_id, value.into());
    }

    fn place_on_clipboard(&self, history_id: &HistoryId, record: ClipboardActionRecord) -> Result<()> {
        let mut state = self.lock();
        let value = state.entry(history_id)?.value.clone();
        state.clipboard = Some(value);
        state.actions.push(record);
        Ok(())
    }
}

#[async_trait]
impl HistoryCommandPort for InMemoryHistoryBackend {
    async fn delete_clipboard_history_by_ids(&self, history_ids: &[HistoryId]) -> Result<()> {
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|e| !history_ids.contains(&e.history_id));
        let removed = before - state.entries.len();
        state.renumber_pinned();
        debug!(removed, "deleted history entries");
        Ok(())
    }

    async fn pinned_clipboard_history_by_ids(
        &self,
        history_ids: &[HistoryId],
        is_pinned: bool,
    ) -> Result<()> {
        let mut state = self.lock();
        for id in history_ids {
            let pos = state
                .position(id)
                .ok_or_else(|| HistoryBackendError::EntryNotFound(id.clone()))?;
            if is_pinned {
                if state.entries[pos].pinned_order_number.is_none() {
                    let order = state.next_pinned_order();
                    state.entries[pos].pinned_order_number = Some(order);
                }
            } else {
                state.entries[pos].pinned_order_number = None;
            }
        }
        if !is_pinned {
            state.renumber_pinned();
        }
        Ok(())
    }

    async fn move_pinned_clipboard_history_up_down(&self, request: &PinnedMove) -> Result<()> {
        let mut state = self.lock();
        let pinned = state.pinned_ids();
        let index = pinned
            .iter()
            .position(|id| id == &request.history_id)
            .ok_or_else(|| HistoryBackendError::NotPinned(request.history_id.clone()))?;
        let neighbor = match request.direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|n| *n < pinned.len()),
        }
        .ok_or_else(|| HistoryBackendError::AtEdge(request.history_id.clone(), request.direction))?;

        let (Some(a), Some(b)) = (state.position(&pinned[index]), state.position(&pinned[neighbor])) else {
            return Err(HistoryBackendError::EntryNotFound(request.history_id.clone()).into());
        };
        let order_a = state.entries[a].pinned_order_number;
        state.entries[a].pinned_order_number = state.entries[b].pinned_order_number;
        state.entries[b].pinned_order_number = order_a;
        Ok(())
    }

    async fn unpin_all_clipboard_history(&self) -> Result<()> {
        let mut state = self.lock();
        for entry in state.entries.iter_mut() {
            entry.pinned_order_number = None;
        }
        Ok(())
    }

    async fn update_item_value_by_history_id(
        &self,
        history_id: &HistoryId,
        item_id: &ItemId,
    ) -> Result<()> {
        let mut state = self.lock();
        let value = state.entry(history_id)?.value.clone();
        let slot = state
            .board_items
            .get_mut(item_id)
            .ok_or_else(|| HistoryBackendError::BoardItemNotFound(item_id.clone()))?;
        *slot = value;
        Ok(())
    }

    async fn fetch_next_clipboard_history_page(&self, request: PageRequest) -> Result<HistoryPage> {
        let now = self.clock.now_ms();
        let state = self.lock();
        let entries: Vec<HistoryEntry> = state
            .entries
            .iter()
            .skip(request.offset)
            .take(request.limit)
            .map(|e| state.with_display_hint(e, now))
            .collect();
        let has_more = request.offset.saturating_add(request.limit) < state.entries.len();
        Ok(HistoryPage { entries, has_more })
    }

    async fn find_clipboard_history(&self, query: &HistoryQuery) -> Result<Vec<HistoryEntry>> {
        let now = self.clock.now_ms();
        let state = self.lock();
        Ok(state
            .entries
            .iter()
            .filter(|e| matches_query(e, query))
            .map(|e| state.with_display_hint(e, now))
            .collect())
    }
}

#[async_trait]
impl ClipboardActionPort for InMemoryHistoryBackend {
    async fn set_copied_item(&self, history_id: &HistoryId) -> Result<()> {
        self.place_on_clipboard(history_id, ClipboardActionRecord::Copied(history_id.clone()))
    }

    async fn set_pasted_item(&self, history_id: &HistoryId) -> Result<()> {
        self.place_on_clipboard(history_id, ClipboardActionRecord::Pasted(history_id.clone()))
    }
}
