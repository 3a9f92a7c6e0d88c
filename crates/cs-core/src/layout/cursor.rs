/// Keyboard focus within the rendered collection.
///
/// 键盘导航光标。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardCursor {
    index: Option<usize>,
}

impl KeyboardCursor {
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Moves one row down; the first move lands on row 0.
    pub fn move_down(&mut self, count: usize) -> Option<usize> {
        if count == 0 {
            self.index = None;
            return None;
        }
        let next = match self.index {
            None => 0,
            Some(i) => (i + 1).min(count - 1),
        };
        self.index = Some(next);
        self.index
    }

    /// Moves one row up, stopping at row 0.
    pub fn move_up(&mut self, count: usize) -> Option<usize> {
        if count == 0 {
            self.index = None;
            return None;
        }
        let next = match self.index {
            None => 0,
            Some(i) => i.saturating_sub(1).min(count - 1),
        };
        self.index = Some(next);
        self.index
    }

    /// Keeps the cursor inside a collection that shrank to `count` rows.
    pub fn clamp(&mut self, count: usize) {
        self.index = match (self.index, count) {
            (_, 0) => None,
            (Some(i), n) => Some(i.min(n - 1)),
            (None, _) => None,
        };
    }

    pub fn reset(&mut self) {
        self.index = None;
    }
}
