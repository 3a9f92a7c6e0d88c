use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::{debug, warn};

use cs_core::history::HistoryEntry;
use cs_core::ports::HistoryCommandPort;
use cs_core::search::{has_search_or_filter, ContentFilter, HistoryQuery, ListSource, SearchFilters};

use crate::usecases::FindClipboardHistory;

#[derive(Debug, Default)]
struct SearchState {
    query_text: String,
    debounced_query: String,
    filters: SearchFilters,
    found: Vec<HistoryEntry>,
}

/// Decides whether the list shows the full history or a search result, and
/// keeps the search result fresh.
///
/// Query text is debounced (last value wins); filter toggles refetch at once.
/// Responses that arrive after a newer refetch or a clear are dropped.
///
/// 搜索/过滤协调器。
#[derive(Clone)]
pub struct SearchCoordinator {
    inner: Arc<SearchInner>,
}

struct SearchInner {
    find: FindClipboardHistory,
    debounce: Duration,
    auto_update_on_capture: AtomicBool,
    state: Mutex<SearchState>,
    pending: Mutex<Option<AbortHandle>>,
    generation: AtomicU64,
}

impl SearchCoordinator {
    pub fn new(history: Arc<dyn HistoryCommandPort>, debounce: Duration, auto_update_on_capture: bool) -> Self {
        Self {
            inner: Arc::new(SearchInner {
                find: FindClipboardHistory::new(history),
                debounce,
                auto_update_on_capture: AtomicBool::new(auto_update_on_capture),
                state: Mutex::new(SearchState::default()),
                pending: Mutex::new(None),
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn set_auto_update_on_capture(&self, enabled: bool) {
        self.inner.auto_update_on_capture.store(enabled, Ordering::Release);
    }

    pub fn query_text(&self) -> String {
        self.inner.lock_state().query_text.clone()
    }

    pub fn debounced_query(&self) -> String {
        self.inner.lock_state().debounced_query.clone()
    }

    pub fn filters(&self) -> SearchFilters {
        self.inner.lock_state().filters.clone()
    }

    pub fn has_search_or_filter(&self) -> bool {
        let state = self.inner.lock_state();
        has_search_or_filter(&state.debounced_query, &state.filters)
    }

    pub fn list_source(&self) -> ListSource {
        ListSource::from_flag(self.has_search_or_filter())
    }

    pub fn results(&self) -> Vec<HistoryEntry> {
        self.inner.lock_state().found.clone()
    }

    /// Records new query text and restarts the debounce timer.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner.lock_state().query_text = text.clone();

        let inner = Arc::clone(&self.inner);
        let mut pending = self.inner.lock_pending();
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        let task = tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            inner.lock_state().debounced_query = text;
            inner.refetch().await;
        });
        *pending = Some(task.abort_handle());
    }

    pub async fn toggle_content_filter(&self, filter: ContentFilter) {
        self.inner.lock_state().filters.toggle_content(filter);
        self.inner.refetch().await;
    }

    pub async fn toggle_code_language(&self, language: impl Into<String>) {
        self.inner.lock_state().filters.toggle_code_language(language);
        self.inner.refetch().await;
    }

    pub async fn toggle_app(&self, app: impl Into<String>) {
        self.inner.lock_state().filters.toggle_app(app);
        self.inner.refetch().await;
    }

    /// Searches again with the current debounced query and filters.
    pub async fn refetch(&self) {
        self.inner.refetch().await;
    }

    /// Handles the backend's clipboard-changed notification.
    pub async fn on_clipboard_updated(&self) -> bool {
        if !self.inner.auto_update_on_capture.load(Ordering::Acquire) || !self.has_search_or_filter() {
            return false;
        }
        self.inner.refetch().await;
        true
    }

    /// Resets query text, debounced query and all filters in one step and
    /// drops any pending debounce or in-flight result.
    pub fn clear(&self) {
        if let Some(pending) = self.inner.lock_pending().take() {
            pending.abort();
        }
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        *self.inner.lock_state() = SearchState::default();
        debug!("Search cleared");
    }
}

impl SearchInner {
    fn lock_state(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<AbortHandle>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn refetch(&self) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let query = {
            let mut state = self.lock_state();
            if !has_search_or_filter(&state.debounced_query, &state.filters) {
                state.found.clear();
                return;
            }
            HistoryQuery::new(state.debounced_query.clone(), &state.filters)
        };

        match self.find.execute(&query).await {
            Ok(found) => {
                if self.generation.load(Ordering::Acquire) != generation {
                    debug!(generation, "Stale search response dropped");
                    return;
                }
                self.lock_state().found = found;
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "Search refetch failed, keeping previous results");
            }
        }
    }
}
