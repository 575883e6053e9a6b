use super::{App, EmptyState};
use crate::wallpaper::{matches_query, pin_current, SortMode};

impl App {
    /// Rescan the configured folders in the current sort order.
    pub fn reload_catalog(&mut self) {
        let mut paths = self
            .services
            .scan(&self.config, self.filters.sort_mode, &self.favorites);
        pin_current(&mut paths, &self.current);
        self.paths = paths;

        self.reset_thumbnail_cache();
        self.update_filtered_wallpapers();
    }

    /// Recompute the visible list from the search query.
    pub fn update_filtered_wallpapers(&mut self) {
        let query = &self.filters.query;
        self.selection.filtered = self
            .paths
            .iter()
            .enumerate()
            .filter(|(_, path)| matches_query(path, query))
            .map(|(i, _)| i)
            .collect();

        if self.selection.filtered.is_empty() {
            self.selection.idx = 0;
        } else if self.selection.idx >= self.selection.filtered.len() {
            self.selection.idx = self.selection.filtered.len() - 1;
        }
        self.ensure_selection_visible();
    }

    /// Cycle sort modes; clears the search.
    pub fn toggle_sort_mode(&mut self) {
        self.filters.sort_mode = self.filters.sort_mode.next();
        self.filters.query.clear();
        self.filters.search_mode = false;
        self.selection.idx = 0;
        self.reload_catalog();
        self.set_status(format!("Sort: {}", self.filters.sort_mode.display_name()));
    }

    pub fn enter_search_mode(&mut self) {
        self.filters.search_mode = true;
    }

    /// Leave search; `clear` also drops the query.
    pub fn exit_search_mode(&mut self, clear: bool) {
        self.filters.search_mode = false;
        if clear && !self.filters.query.is_empty() {
            self.filters.query.clear();
            self.update_filtered_wallpapers();
        }
    }

    pub fn search_input(&mut self, c: char) {
        self.filters.query.push(c);
        self.selection.idx = 0;
        self.update_filtered_wallpapers();
    }

    pub fn search_backspace(&mut self) {
        if self.filters.query.pop().is_some() {
            self.update_filtered_wallpapers();
        }
    }

    /// What to show instead of the grid, if anything.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.selection.filtered.is_empty() {
            return None;
        }
        if !self.paths.is_empty() {
            return Some(EmptyState::NoResults);
        }
        if self.config.wall_dirs.is_empty() {
            Some(EmptyState::NoFolders)
        } else if self.filters.sort_mode == SortMode::Starred {
            Some(EmptyState::NoFavorites)
        } else {
            Some(EmptyState::NoImages(self.config.wall_dirs.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::app_with_images;
    use crate::app::EmptyState;
    use crate::wallpaper::SortMode;

    #[tokio::test]
    async fn search_filters_without_rescanning() {
        let root = tempfile::tempdir().unwrap();
        let mut app = app_with_images(root.path(), &["red_sky.png", "blue-sea.jpg", "red_car.png"]);
        assert_eq!(app.selection.filtered.len(), 3);

        app.enter_search_mode();
        for c in "red".chars() {
            app.search_input(c);
        }
        assert_eq!(app.selection.filtered.len(), 2);

        app.search_input('x');
        assert_eq!(app.empty_state(), Some(EmptyState::NoResults));

        app.exit_search_mode(true);
        assert!(!app.filters.search_mode);
        assert_eq!(app.selection.filtered.len(), 3);
        assert_eq!(app.paths.len(), 3);
    }

    #[tokio::test]
    async fn sort_change_resets_search() {
        let root = tempfile::tempdir().unwrap();
        let mut app = app_with_images(root.path(), &["a.png", "b.png"]);
        app.filters.query = "a".to_string();
        app.update_filtered_wallpapers();
        assert_eq!(app.selection.filtered.len(), 1);

        app.toggle_sort_mode();
        assert_eq!(app.filters.sort_mode, SortMode::Recent);
        assert!(app.filters.query.is_empty());
        assert_eq!(app.selection.filtered.len(), 2);
    }

    #[tokio::test]
    async fn starred_without_favorites_is_its_own_empty_state() {
        let root = tempfile::tempdir().unwrap();
        let mut app = app_with_images(root.path(), &["a.png"]);
        app.filters.sort_mode = SortMode::Starred;
        app.reload_catalog();
        assert_eq!(app.empty_state(), Some(EmptyState::NoFavorites));

        app.config.wall_dirs.clear();
        app.reload_catalog();
        assert_eq!(app.empty_state(), Some(EmptyState::NoFolders));
    }
}
