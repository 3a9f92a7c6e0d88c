use cs_core::drag::{BoardItemDraft, CollisionResolver, DragState, DropTargetRegistry};
use cs_core::history::{sync_pinned_order, HistoryEntry, SelectionSet};
use cs_core::ids::HistoryId;
use cs_core::layout::{KeyboardCursor, RowHeightCache};
use cs_core::pinned::PinnedTray;
use cs_core::search::ListSource;

/// Everything the history page owns. Only the controller mutates it.
#[derive(Debug)]
pub(crate) struct PageState {
    pub all: Vec<HistoryEntry>,
    /// Unknown until the first page arrives.
    pub has_more: bool,
    pub selection: SelectionSet,
    pub drag: DragState,
    pub resolver: CollisionResolver,
    pub registry: DropTargetRegistry,
    pub rows: RowHeightCache,
    pub cursor: KeyboardCursor,
    pub tray: PinnedTray,
    pub source: ListSource,
    pub staged_board_item: Option<BoardItemDraft>,
    pub copied_item: Option<HistoryId>,
    pub pasted_item: Option<HistoryId>,
    pub scroll_top: u64,
    pub viewport_height: u32,
}

impl PageState {
    pub fn new(default_row_height: u32, tray_collapsed: bool) -> Self {
        Self {
            all: Vec::new(),
            has_more: true,
            selection: SelectionSet::new(),
            drag: DragState::Idle,
            resolver: CollisionResolver::new(),
            registry: DropTargetRegistry::new(),
            rows: RowHeightCache::new(default_row_height),
            cursor: KeyboardCursor::default(),
            tray: PinnedTray::new(tray_collapsed),
            source: ListSource::All,
            staged_board_item: None,
            copied_item: None,
            pasted_item: None,
            scroll_top: 0,
            viewport_height: 0,
        }
    }

    /// Switches the rendered collection. Offsets computed for the previous
    /// collection no longer apply.
    pub fn switch_source(&mut self, source: ListSource) -> bool {
        if self.source == source {
            return false;
        }
        self.source = source;
        self.rows.reset_after_index(0);
        self.cursor.reset();
        true
    }

    /// Appends a fetched page, skipping entries that are already loaded.
    pub fn append_page(&mut self, entries: Vec<HistoryEntry>, has_more: bool) -> usize {
        let before = self.all.len();
        for entry in entries {
            if !self.all.iter().any(|e| e.history_id == entry.history_id) {
                self.all.push(entry);
            }
        }
        self.has_more = has_more;
        self.tray.reconcile(&self.all);
        self.all.len() - before
    }

    pub fn replace_all(&mut self, entries: Vec<HistoryEntry>, has_more: bool) {
        self.all = entries;
        self.has_more = has_more;
        self.rows.reset_after_index(0);
        self.tray.reconcile(&self.all);
    }

    /// Replaces the tray with the backend's pinned set and mirrors its order
    /// onto the loaded entries. Loaded entries missing from the set are no
    /// longer pinned.
    pub fn set_pinned(&mut self, pinned: Vec<HistoryEntry>) {
        self.tray.sync(&pinned);
        sync_pinned_order(&mut self.all, self.tray.entries());
        for entry in &mut self.all {
            if entry.is_pinned() && !self.tray.contains(&entry.history_id) {
                entry.pinned_order_number = None;
            }
        }
    }

    pub fn remove_entries(&mut self, ids: &[HistoryId]) {
        let before = self.all.len();
        self.all.retain(|e| !ids.contains(&e.history_id));
        if self.all.len() != before {
            self.rows.reset_after_index(0);
        }
        for id in ids {
            self.selection.remove(id);
        }
        for marker in [&mut self.copied_item, &mut self.pasted_item] {
            if marker.as_ref().is_some_and(|id| ids.contains(id)) {
                *marker = None;
            }
        }
        self.tray.remove(ids);
    }

    /// Marks loaded entries as pinned, appending them to the end of the
    /// pinned order.
    pub fn mark_pinned(&mut self, ids: &[HistoryId]) {
        let mut next = self
            .all
            .iter()
            .filter_map(|e| e.pinned_order_number)
            .chain(self.tray.max_order())
            .max()
            .map_or(0, |max| max + 1);
        for id in ids {
            if let Some(entry) = self.all.iter_mut().find(|e| &e.history_id == id) {
                if entry.pinned_order_number.is_none() {
                    entry.pinned_order_number = Some(next);
                    next += 1;
                }
            }
        }
        self.tray.reconcile(&self.all);
    }

    /// Mirrors the tray's order numbers onto the loaded entries.
    pub fn sync_order_from_tray(&mut self) {
        sync_pinned_order(&mut self.all, self.tray.entries());
    }

    pub fn clear_pinned(&mut self) {
        for entry in &mut self.all {
            entry.pinned_order_number = None;
        }
    }

    pub fn find_entry<'a>(&'a self, found: &'a [HistoryEntry], id: &HistoryId) -> Option<&'a HistoryEntry> {
        self.all
            .iter()
            .chain(found.iter())
            .find(|e| &e.history_id == id)
    }
}
