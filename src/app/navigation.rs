use super::App;
use std::path::Path;

impl App {
    /// Return the currently selected image path, if any.
    pub fn selected_path(&self) -> Option<&Path> {
        self.selection
            .filtered
            .get(self.selection.idx)
            .and_then(|&i| self.paths.get(i))
            .map(|p| p.as_path())
    }

    fn columns(&self) -> usize {
        self.config.columns.max(1)
    }

    pub fn move_right(&mut self) {
        let len = self.selection.filtered.len();
        if self.selection.idx + 1 < len {
            self.selection.idx += 1;
            self.ensure_selection_visible();
        }
    }

    pub fn move_left(&mut self) {
        if self.selection.idx > 0 {
            self.selection.idx -= 1;
            self.ensure_selection_visible();
        }
    }

    /// Down one row; on a short last row land on the final card.
    pub fn move_down(&mut self) {
        let len = self.selection.filtered.len();
        if len == 0 {
            return;
        }
        let target = self.selection.idx + self.columns();
        let last_row = (len - 1) / self.columns();
        if self.selection.idx / self.columns() < last_row {
            self.selection.idx = target.min(len - 1);
            self.ensure_selection_visible();
        }
    }

    pub fn move_up(&mut self) {
        if self.selection.idx >= self.columns() {
            self.selection.idx -= self.columns();
            self.ensure_selection_visible();
        }
    }

    pub fn select_index(&mut self, idx: usize) {
        if idx < self.selection.filtered.len() {
            self.selection.idx = idx;
            self.ensure_selection_visible();
        }
    }

    /// Scroll so the selected row is within the visible rows.
    pub fn ensure_selection_visible(&mut self) {
        let rows = self.config.rows.max(1);
        let row = self.selection.idx / self.columns();
        if row < self.selection.scroll_row {
            self.selection.scroll_row = row;
        } else if row >= self.selection.scroll_row + rows {
            self.selection.scroll_row = row + 1 - rows;
        }
    }

    /// Range of `filtered` positions drawn on screen.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let len = self.selection.filtered.len();
        let start = (self.selection.scroll_row * self.columns()).min(len);
        let end = (start + self.config.page_size()).min(len);
        start..end
    }
}
