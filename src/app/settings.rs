use super::{App, Page};
use crate::utils::{expand_tilde, format_bytes, shorten_path};

/// One selectable line on the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    /// Configured folder at this index
    Folder(usize),
    AddFolder,
    MaxImages,
    PictureMode,
    Columns,
    Rows,
    ClearCache,
}

impl App {
    pub fn open_settings(&mut self) {
        self.ui.page = Page::Settings;
        self.settings.prompt = None;
        self.refresh_cache_label();
        self.clamp_settings_row();
    }

    pub fn close_settings(&mut self) {
        self.settings.prompt = None;
        self.ui.page = Page::Grid;
    }

    /// Rows in display order: folders first, then the add button and options.
    pub fn settings_rows(&self) -> Vec<SettingsRow> {
        let mut rows: Vec<SettingsRow> = (0..self.config.wall_dirs.len())
            .map(SettingsRow::Folder)
            .collect();
        rows.extend([
            SettingsRow::AddFolder,
            SettingsRow::MaxImages,
            SettingsRow::PictureMode,
            SettingsRow::Columns,
            SettingsRow::Rows,
            SettingsRow::ClearCache,
        ]);
        rows
    }

    pub fn selected_setting(&self) -> SettingsRow {
        self.settings_rows()
            .get(self.settings.row)
            .copied()
            .unwrap_or(SettingsRow::AddFolder)
    }

    pub fn settings_up(&mut self) {
        self.settings.row = self.settings.row.saturating_sub(1);
    }

    pub fn settings_down(&mut self) {
        if self.settings.row + 1 < self.settings_rows().len() {
            self.settings.row += 1;
        }
    }

    fn clamp_settings_row(&mut self) {
        let last = self.settings_rows().len().saturating_sub(1);
        self.settings.row = self.settings.row.min(last);
    }

    /// Left/right on a value row.
    pub fn settings_adjust(&mut self, up: bool) {
        match self.selected_setting() {
            SettingsRow::MaxImages => self.config.step_max_images(up),
            SettingsRow::PictureMode => {
                self.config.picture_mode = if up {
                    self.config.picture_mode.next()
                } else {
                    previous_mode(self.config.picture_mode)
                };
            }
            SettingsRow::Columns => self.config.step_columns(up),
            SettingsRow::Rows => self.config.step_rows(up),
            _ => return,
        }
        self.commit_config();
    }

    /// Enter on the selected row.
    pub fn settings_activate(&mut self) {
        match self.selected_setting() {
            SettingsRow::AddFolder => self.settings.prompt = Some(String::new()),
            SettingsRow::ClearCache => self.clear_thumbnail_cache(),
            SettingsRow::PictureMode => self.settings_adjust(true),
            SettingsRow::Folder(_) => self.remove_selected_folder(),
            _ => {}
        }
    }

    pub fn remove_selected_folder(&mut self) {
        let SettingsRow::Folder(idx) = self.selected_setting() else {
            return;
        };
        let Some(dir) = self.config.wall_dirs.get(idx).cloned() else {
            return;
        };

        if self.config.remove_dir(&dir) {
            self.services.thumbnails.clear();
            self.refresh_cache_label();
            self.set_status(format!("Removed {}", shorten_path(&dir)));
            self.commit_config();
            self.clamp_settings_row();
        }
    }

    pub fn prompt_input(&mut self, c: char) {
        if let Some(text) = &mut self.settings.prompt {
            text.push(c);
        }
    }

    pub fn prompt_backspace(&mut self) {
        if let Some(text) = &mut self.settings.prompt {
            text.pop();
        }
    }

    pub fn prompt_cancel(&mut self) {
        self.settings.prompt = None;
    }

    /// Add the typed folder. Missing directories are refused.
    pub fn prompt_submit(&mut self) {
        let Some(text) = self.settings.prompt.take() else {
            return;
        };
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let dir = expand_tilde(text);
        if !dir.is_dir() {
            self.set_status(format!("Not a folder: {}", shorten_path(&dir)));
            return;
        }
        if self.config.add_dir(dir.clone()) {
            self.set_status(format!("Added {}", shorten_path(&dir)));
            self.commit_config();
        } else {
            self.set_status("Folder already added");
        }
    }

    fn clear_thumbnail_cache(&mut self) {
        if self.services.thumbnails.clear() {
            self.reset_thumbnail_cache();
            self.set_status("Cache cleared");
        } else {
            self.set_status("Could not clear cache");
        }
        self.refresh_cache_label();
    }

    fn refresh_cache_label(&mut self) {
        let (bytes, files) = self.services.thumbnails.cache_info();
        self.settings.cache_label = format!("Cache: {} ({files} files)", format_bytes(bytes));
    }

    fn commit_config(&mut self) {
        self.services.save_config(&self.config);
        self.reload_catalog();
    }
}

fn previous_mode(mode: super::PictureMode) -> super::PictureMode {
    let all = super::PictureMode::ALL;
    let pos = all.iter().position(|m| *m == mode).unwrap_or(0);
    all[(pos + all.len() - 1) % all.len()]
}
