use super::RowHeightCache;

/// Inputs of one windowing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRequest {
    pub item_count: usize,
    pub scroll_top: u64,
    pub viewport_height: u32,
    /// Extra rows mounted above and below the viewport.
    pub overscan: usize,
}

/// A row to mount at a vertical offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    pub index: usize,
    pub top: u64,
    pub height: u32,
}

/// Result of a windowing pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibleWindow {
    /// Rows to mount, including overscan, in index order.
    pub rows: Vec<VisibleRow>,
    /// First and last index intersecting the viewport (without overscan).
    pub visible: Option<(usize, usize)>,
    pub total_height: u64,
}

impl VisibleWindow {
    pub fn last_visible_index(&self) -> Option<usize> {
        self.visible.map(|(_, last)| last)
    }
}

/// Selects the rows whose extent intersects `[scroll_top, scroll_top + viewport_height)`.
pub fn compute_window(cache: &mut RowHeightCache, request: WindowRequest) -> VisibleWindow {
    let count = request.item_count;
    let total_height = cache.total_height(count);
    if count == 0 || request.viewport_height == 0 {
        return VisibleWindow {
            rows: Vec::new(),
            visible: None,
            total_height,
        };
    }

    let scroll_top = request.scroll_top.min(total_height.saturating_sub(1));
    let bottom = scroll_top + u64::from(request.viewport_height) - 1;
    let (Some(first), Some(last)) = (
        cache.index_at_offset(scroll_top, count),
        cache.index_at_offset(bottom, count),
    ) else {
        return VisibleWindow::default();
    };

    let start = first.saturating_sub(request.overscan);
    let end = (last + request.overscan).min(count - 1);
    let rows = (start..=end)
        .map(|index| VisibleRow {
            index,
            top: cache.offset_of(index),
            height: cache.height(index),
        })
        .collect();

    VisibleWindow {
        rows,
        visible: Some((first, last)),
        total_height,
    }
}

/// Whether the last visible row is within `threshold` rows of the end of the
/// `loaded` collection.
pub fn needs_more_rows(last_visible: usize, loaded: usize, threshold: usize) -> bool {
    last_visible.saturating_add(threshold) >= loaded
}

/// Scroll offset that brings row `index` fully into view, or `None` if it
/// already is.
pub fn scroll_offset_to_reveal(
    cache: &mut RowHeightCache,
    index: usize,
    scroll_top: u64,
    viewport_height: u32,
) -> Option<u64> {
    let top = cache.offset_of(index);
    let bottom = top + u64::from(cache.height(index));
    let viewport_bottom = scroll_top + u64::from(viewport_height);

    if top < scroll_top {
        Some(top)
    } else if bottom > viewport_bottom {
        Some(bottom.saturating_sub(u64::from(viewport_height)))
    } else {
        None
    }
}
