//! Page-level owner of the history list state.
//!
//! [`HistoryPageController`] holds the selection, drag session, row height
//! cache, pinned tray and loaded history behind one mutex. The lock is never
//! held across an await: backend calls run between a "prepare" and a
//! "reconcile" critical section.
//!
//! The pinned tray is loaded with its own backend query, so it holds pinned
//! entries that no loaded page has reached yet.

mod config;
mod drop;
mod list;
mod state;
mod tray;

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::AbortHandle;
use tracing::error;

use cs_core::drag::DragStateMachine;
use cs_core::history::HistoryEntry;
use cs_core::ports::{NotificationPort, Toast};
use cs_core::search::ListSource;

use crate::deps::HistoryDeps;
use crate::search::SearchCoordinator;
use crate::sequence::SequenceRunner;
use crate::usecases::{
    CopyHistoryEntry, DeleteHistoryEntries, FetchNextHistoryPage, FindClipboardHistory,
    MovePinnedEntry, PinHistoryEntries, UnpinAllHistory, UpdateBoardItemFromHistory, UpdateTrayCollapsed,
};

pub use config::ControllerConfig;
pub use drop::DropOutcome;
pub use list::CursorMove;

use state::PageState;

/// 历史列表页面控制器。
#[derive(Clone)]
pub struct HistoryPageController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    state: Mutex<PageState>,
    drag_machine: DragStateMachine,
    reset_timer: Mutex<Option<AbortHandle>>,
    notifier: Arc<dyn NotificationPort>,
    search: SearchCoordinator,
    sequence: SequenceRunner,
    fetch_page: FetchNextHistoryPage,
    find_pinned: FindClipboardHistory,
    delete: DeleteHistoryEntries,
    pin: PinHistoryEntries,
    move_pinned: MovePinnedEntry,
    unpin_all: UnpinAllHistory,
    update_board_item: UpdateBoardItemFromHistory,
    copy: CopyHistoryEntry,
    save_tray_collapsed: UpdateTrayCollapsed,
}

impl HistoryPageController {
    pub fn new(deps: HistoryDeps, config: ControllerConfig) -> Self {
        let search = SearchCoordinator::new(
            Arc::clone(&deps.history),
            config.search_debounce,
            config.auto_update_on_capture,
        );
        let sequence = SequenceRunner::new(Arc::clone(&deps.clipboard), Arc::clone(&deps.notifier));

        Self {
            inner: Arc::new(ControllerInner {
                state: Mutex::new(PageState::new(config.default_row_height, config.tray_collapsed)),
                drag_machine: DragStateMachine::new(config.drag_reset_delay),
                reset_timer: Mutex::new(None),
                notifier: deps.notifier,
                search,
                sequence,
                fetch_page: FetchNextHistoryPage::new(Arc::clone(&deps.history)),
                find_pinned: FindClipboardHistory::new(Arc::clone(&deps.history)),
                delete: DeleteHistoryEntries::new(Arc::clone(&deps.history)),
                pin: PinHistoryEntries::new(Arc::clone(&deps.history)),
                move_pinned: MovePinnedEntry::new(Arc::clone(&deps.history)),
                unpin_all: UnpinAllHistory::new(Arc::clone(&deps.history)),
                update_board_item: UpdateBoardItemFromHistory::new(deps.history),
                copy: CopyHistoryEntry::new(deps.clipboard),
                save_tray_collapsed: UpdateTrayCollapsed::new(deps.settings),
                config,
            }),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    pub fn search(&self) -> &SearchCoordinator {
        &self.inner.search
    }

    pub fn sequence(&self) -> &SequenceRunner {
        &self.inner.sequence
    }

    /// Loaded entries of the unfiltered collection.
    pub fn all_entries(&self) -> Vec<HistoryEntry> {
        self.inner.lock_state().all.clone()
    }

    pub fn list_source(&self) -> ListSource {
        let mut state = self.inner.lock_state();
        self.inner.sync_source(&mut state)
    }
}

impl ControllerInner {
    fn lock_state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_reset_timer(&self) -> MutexGuard<'_, Option<AbortHandle>> {
        self.reset_timer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Follows the search coordinator's choice of collection.
    fn sync_source(&self, state: &mut PageState) -> ListSource {
        let source = self.search.list_source();
        state.switch_source(source);
        source
    }

    /// Length of the collection currently rendered.
    fn rendered_len(&self, state: &mut PageState) -> usize {
        match self.sync_source(state) {
            ListSource::All => state.all.len(),
            ListSource::Found => self.search.results().len(),
        }
    }

    async fn report_failure(&self, err: anyhow::Error, summary: &str) {
        error!(error = %format!("{err:#}"), "{summary}");
        self.notifier.notify(Toast::error(summary)).await;
    }
}
