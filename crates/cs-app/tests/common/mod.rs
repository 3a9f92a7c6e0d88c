//! Recording port fakes shared by the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::time::Instant;

use cs_app::{ControllerConfig, HistoryDeps, HistoryPageController};
use cs_core::history::{HistoryEntry, HistoryPage, PageRequest};
use cs_core::ids::{HistoryId, ItemId};
use cs_core::pinned::{MoveDirection, PinnedMove};
use cs_core::ports::{ClipboardActionPort, HistoryCommandPort, SettingsPort};
use cs_core::search::{ContentFilter, HistoryQuery};
use cs_core::settings::Settings;
use cs_infra::TracingNotifier;

pub fn ids(values: &[&str]) -> Vec<HistoryId> {
    values.iter().map(|v| HistoryId::from(*v)).collect()
}

/// `count` text entries `e0..e{count-1}`, newest first.
pub fn entries(count: usize) -> Vec<HistoryEntry> {
    (0..count)
        .map(|n| HistoryEntry::text(HistoryId::from(format!("e{n}")), format!("value {n}"), n as i64))
        .collect()
}

/// Backend calls in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Delete(Vec<HistoryId>),
    Pin(Vec<HistoryId>, bool),
    Move(PinnedMove),
    UnpinAll,
    UpdateItem(HistoryId, ItemId),
    FetchPage(PageRequest),
    Find(HistoryQuery),
}

/// History backend that serves pages from a fixed list and records calls.
///
/// Page fetches can be held at a gate: while gated, every fetch waits for a
/// permit released by [`RecordingHistory::release_pages`].
pub struct RecordingHistory {
    entries: Mutex<Vec<HistoryEntry>>,
    calls: Mutex<Vec<Call>>,
    page_calls: AtomicUsize,
    gated: AtomicBool,
    page_gate: Semaphore,
    fail_commands: AtomicBool,
    fail_finds: AtomicBool,
}

impl RecordingHistory {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            calls: Mutex::new(Vec::new()),
            page_calls: AtomicUsize::new(0),
            gated: AtomicBool::new(false),
            page_gate: Semaphore::new(0),
            fail_commands: AtomicBool::new(false),
            fail_finds: AtomicBool::new(false),
        }
    }

    pub fn gate_pages(&self) {
        self.gated.store(true, Ordering::SeqCst);
    }

    pub fn release_pages(&self, count: usize) {
        self.page_gate.add_permits(count);
    }

    /// Makes every mutating command fail.
    pub fn fail_commands(&self, fail: bool) {
        self.fail_commands.store(fail, Ordering::SeqCst);
    }

    pub fn fail_finds(&self, fail: bool) {
        self.fail_finds.store(fail, Ordering::SeqCst);
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Searches issued for the list, excluding pinned tray reloads.
    pub fn finds(&self) -> Vec<HistoryQuery> {
        self.all_finds()
            .into_iter()
            .filter(|query| *query != HistoryQuery::pinned())
            .collect()
    }

    pub fn pinned_refreshes(&self) -> usize {
        self.all_finds()
            .iter()
            .filter(|query| **query == HistoryQuery::pinned())
            .count()
    }

    fn all_finds(&self) -> Vec<HistoryQuery> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Find(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn deletes(&self) -> Vec<Vec<HistoryId>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Delete(ids) => Some(ids),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn command_result(&self) -> Result<()> {
        if self.fail_commands.load(Ordering::SeqCst) {
            Err(anyhow!("backend unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl HistoryCommandPort for RecordingHistory {
    async fn delete_clipboard_history_by_ids(&self, history_ids: &[HistoryId]) -> Result<()> {
        self.record(Call::Delete(history_ids.to_vec()));
        self.command_result()?;
        self.entries
            .lock()
            .unwrap()
            .retain(|e| !history_ids.contains(&e.history_id));
        Ok(())
    }

    async fn pinned_clipboard_history_by_ids(&self, history_ids: &[HistoryId], is_pinned: bool) -> Result<()> {
        self.record(Call::Pin(history_ids.to_vec(), is_pinned));
        self.command_result()?;
        let mut entries = self.entries.lock().unwrap();
        let mut next = entries
            .iter()
            .filter_map(|e| e.pinned_order_number)
            .max()
            .map_or(0, |max| max + 1);
        for entry in entries.iter_mut().filter(|e| history_ids.contains(&e.history_id)) {
            if !is_pinned {
                entry.pinned_order_number = None;
            } else if entry.pinned_order_number.is_none() {
                entry.pinned_order_number = Some(next);
                next += 1;
            }
        }
        Ok(())
    }

    async fn move_pinned_clipboard_history_up_down(&self, request: &PinnedMove) -> Result<()> {
        self.record(Call::Move(request.clone()));
        self.command_result()?;
        let mut entries = self.entries.lock().unwrap();
        let mut pinned: Vec<usize> = (0..entries.len())
            .filter(|i| entries[*i].pinned_order_number.is_some())
            .collect();
        pinned.sort_by_key(|i| entries[*i].pinned_order_number);
        let Some(at) = pinned.iter().position(|i| entries[*i].history_id == request.history_id) else {
            return Err(anyhow!("entry is not pinned"));
        };
        let neighbor = match request.direction {
            MoveDirection::Up => at.checked_sub(1),
            MoveDirection::Down => Some(at + 1).filter(|n| *n < pinned.len()),
        }
        .ok_or_else(|| anyhow!("already at the edge"))?;
        let (a, b) = (pinned[at], pinned[neighbor]);
        let order = entries[a].pinned_order_number;
        entries[a].pinned_order_number = entries[b].pinned_order_number;
        entries[b].pinned_order_number = order;
        Ok(())
    }

    async fn unpin_all_clipboard_history(&self) -> Result<()> {
        self.record(Call::UnpinAll);
        self.command_result()?;
        for entry in self.entries.lock().unwrap().iter_mut() {
            entry.pinned_order_number = None;
        }
        Ok(())
    }

    async fn update_item_value_by_history_id(&self, history_id: &HistoryId, item_id: &ItemId) -> Result<()> {
        self.record(Call::UpdateItem(history_id.clone(), item_id.clone()));
        self.command_result()
    }

    async fn fetch_next_clipboard_history_page(&self, request: PageRequest) -> Result<HistoryPage> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.record(Call::FetchPage(request));
        if self.gated.load(Ordering::SeqCst) {
            self.page_gate.acquire().await?.forget();
        }
        let entries = self.entries.lock().unwrap();
        Ok(HistoryPage {
            entries: entries.iter().skip(request.offset).take(request.limit).cloned().collect(),
            has_more: request.offset + request.limit < entries.len(),
        })
    }

    async fn find_clipboard_history(&self, query: &HistoryQuery) -> Result<Vec<HistoryEntry>> {
        self.record(Call::Find(query.clone()));
        if self.fail_finds.load(Ordering::SeqCst) {
            return Err(anyhow!("search index unavailable"));
        }
        let needle = query.query.to_lowercase();
        let pinned_only = query.filters.contains(&ContentFilter::Pinned);
        let mut found: Vec<HistoryEntry> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.value.to_lowercase().contains(&needle))
            .filter(|e| !pinned_only || e.is_pinned())
            .cloned()
            .collect();
        if pinned_only {
            found.sort_by_key(|e| e.pinned_order_number);
        }
        Ok(found)
    }
}

/// Clipboard that records when each entry was acted upon.
pub struct TimedClipboard {
    started: Instant,
    acted: Mutex<Vec<(HistoryId, Duration)>>,
    failing: Mutex<Vec<HistoryId>>,
}

impl TimedClipboard {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            acted: Mutex::new(Vec::new()),
            failing: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_on(&self, history_id: &str) {
        self.failing.lock().unwrap().push(HistoryId::from(history_id));
    }

    pub fn acted(&self) -> Vec<(HistoryId, Duration)> {
        self.acted.lock().unwrap().clone()
    }

    pub fn acted_ids(&self) -> Vec<HistoryId> {
        self.acted().into_iter().map(|(id, _)| id).collect()
    }

    fn act(&self, history_id: &HistoryId) -> Result<()> {
        if self.failing.lock().unwrap().contains(history_id) {
            return Err(anyhow!("clipboard busy"));
        }
        self.acted
            .lock()
            .unwrap()
            .push((history_id.clone(), self.started.elapsed()));
        Ok(())
    }
}

#[async_trait]
impl ClipboardActionPort for TimedClipboard {
    async fn set_copied_item(&self, history_id: &HistoryId) -> Result<()> {
        self.act(history_id)
    }

    async fn set_pasted_item(&self, history_id: &HistoryId) -> Result<()> {
        self.act(history_id)
    }
}

#[derive(Default)]
pub struct MemorySettings {
    pub saved: Mutex<Option<Settings>>,
}

#[async_trait]
impl SettingsPort for MemorySettings {
    async fn load(&self) -> Result<Settings> {
        Ok(self.saved.lock().unwrap().clone().unwrap_or_default())
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        *self.saved.lock().unwrap() = Some(settings.clone());
        Ok(())
    }
}

/// A controller over recording fakes.
pub struct Harness {
    pub controller: HistoryPageController,
    pub history: Arc<RecordingHistory>,
    pub clipboard: Arc<TimedClipboard>,
    pub notifier: Arc<TracingNotifier>,
    pub settings: Arc<MemorySettings>,
}

impl Harness {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        Self::with_config(entries, ControllerConfig::default())
    }

    pub fn with_config(entries: Vec<HistoryEntry>, config: ControllerConfig) -> Self {
        let history = Arc::new(RecordingHistory::new(entries));
        let clipboard = Arc::new(TimedClipboard::new());
        let notifier = Arc::new(TracingNotifier::new());
        let settings = Arc::new(MemorySettings::default());
        let controller = HistoryPageController::new(
            HistoryDeps {
                history: history.clone(),
                clipboard: clipboard.clone(),
                notifier: notifier.clone(),
                settings: settings.clone(),
            },
            config,
        );
        Self {
            controller,
            history,
            clipboard,
            notifier,
            settings,
        }
    }

    /// Loads pages until the backend reports the end.
    pub async fn load_all(&self) {
        while self.controller.load_more().await {}
    }
}
