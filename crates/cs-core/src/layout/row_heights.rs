use std::collections::HashMap;

/// Height used for rows that have not been measured yet.
pub const DEFAULT_ROW_HEIGHT: u32 = 60;

/// Measured row heights keyed by list index, plus lazily computed cumulative
/// offsets.
///
/// Measurements are never deleted: when the underlying collection changes,
/// callers invalidate offsets with [`RowHeightCache::reset_after_index`] and
/// rows re-report their heights as they render.
///
/// 行高缓存：索引 → 实测高度；未测量的行使用默认高度。
#[derive(Debug, Clone)]
pub struct RowHeightCache {
    measured: HashMap<usize, u32>,
    default_height: u32,
    // offsets[i] is the top of row i; only the prefix that is present is valid.
    offsets: Vec<u64>,
}

impl Default for RowHeightCache {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_HEIGHT)
    }
}

impl RowHeightCache {
    pub fn new(default_height: u32) -> Self {
        Self {
            measured: HashMap::new(),
            default_height,
            offsets: vec![0],
        }
    }

    pub fn default_height(&self) -> u32 {
        self.default_height
    }

    /// Measured height at `index`, or the default when unmeasured.
    pub fn height(&self, index: usize) -> u32 {
        self.measured
            .get(&index)
            .copied()
            .unwrap_or(self.default_height)
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.contains_key(&index)
    }

    /// Records a measured height. Returns `true` when the stored height
    /// changed, in which case offsets after `index` are invalidated.
    pub fn set(&mut self, index: usize, height: u32) -> bool {
        if self.measured.get(&index) == Some(&height) {
            return false;
        }
        self.measured.insert(index, height);
        self.reset_after_index(index);
        true
    }

    /// Invalidates the cumulative offsets of every row after `index`.
    pub fn reset_after_index(&mut self, index: usize) {
        self.offsets.truncate(index + 1);
    }

    /// Top offset of row `index` (equal to the sum of all heights before it).
    pub fn offset_of(&mut self, index: usize) -> u64 {
        while self.offsets.len() <= index {
            let last = self.offsets.len() - 1;
            let next = self.offsets[last] + u64::from(self.height(last));
            self.offsets.push(next);
        }
        self.offsets[index]
    }

    /// Total scroll height of a collection with `count` rows.
    pub fn total_height(&mut self, count: usize) -> u64 {
        self.offset_of(count)
    }

    /// Index of the row covering vertical position `y` within a collection
    /// of `count` rows. Positions past the end map to the last row.
    pub fn index_at_offset(&mut self, y: u64, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        self.offset_of(count);
        let after = self.offsets[..=count].partition_point(|&top| top <= y);
        Some(after.saturating_sub(1).min(count - 1))
    }
}
