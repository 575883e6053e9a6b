use super::App;
use crate::utils::{display_name, file_name_of};
use crate::wallpaper::SortMode;
use anyhow::{Context, Result};
use rand::Rng;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::warn;

impl App {
    /// Apply the selected wallpaper to the desktop.
    pub fn apply_wallpaper(&mut self) {
        let Some(path) = self.selected_path().map(|p| p.to_path_buf()) else {
            return;
        };

        if self.services.applier.apply(&path, self.config.picture_mode) {
            self.set_status(format!("Applied {}", display_name(&file_name_of(&path))));
            self.current = path;
        } else if !self.services.applier.is_available() {
            self.set_status("Desktop background settings are not available");
        } else {
            self.set_status("File no longer exists, press R to rescan");
        }
    }

    /// Select and apply a random image among the visible ones.
    pub fn random_wallpaper(&mut self) {
        let len = self.selection.filtered.len();
        if len == 0 {
            return;
        }
        let idx = rand::thread_rng().gen_range(0..len);
        self.select_index(idx);
        self.apply_wallpaper();
    }

    /// Star or unstar the selected image.
    pub fn toggle_favorite(&mut self) {
        let Some(name) = self.selected_path().map(file_name_of) else {
            return;
        };
        let starred = self.favorites.toggle(&name);
        self.services.save_favorites(&self.favorites);
        if self.filters.sort_mode == SortMode::Starred {
            self.reload_catalog();
        }
        self.set_status(if starred {
            format!("★ {}", display_name(&name))
        } else {
            format!("☆ {}", display_name(&name))
        });
    }

    /// Ask before deleting the selected image.
    pub fn request_delete(&mut self) {
        self.ui.confirm_delete = self.selected_path().map(|p| p.to_path_buf());
    }

    pub fn cancel_delete(&mut self) {
        self.ui.confirm_delete = None;
    }

    /// Delete the image awaiting confirmation. On failure nothing changes.
    pub fn confirm_delete(&mut self) {
        let Some(path) = self.ui.confirm_delete.take() else {
            return;
        };

        match self.services.delete_wallpaper(&path) {
            Ok(()) => {
                self.favorites.remove(&file_name_of(&path));
                if self.current == path {
                    self.current = PathBuf::new();
                }
                self.set_status(format!("Deleted {}", file_name_of(&path)));
                self.reload_catalog();
            }
            Err(err) => {
                warn!("{err:#}");
                self.set_status(format!("Could not delete {}", file_name_of(&path)));
            }
        }
    }

    /// Open the selected image's folder in the file manager.
    pub fn reveal_in_file_manager(&mut self) {
        let Some(dir) = self
            .selected_path()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
        else {
            return;
        };

        if let Err(err) = spawn_detached("xdg-open", &dir) {
            warn!("{err:#}");
            self.set_status("xdg-open is not available");
        }
    }

    /// Rescan folders and refresh the applied wallpaper.
    pub fn rescan(&mut self) {
        self.current = self.services.applier.current();
        self.favorites = self.services.load_favorites();
        self.reload_catalog();
        self.set_status(format!("Rescan: {} wallpapers", self.paths.len()));
    }
}

fn spawn_detached(program: &str, arg: &Path) -> Result<()> {
    Command::new(program)
        .arg(arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to run {program}"))?;
    Ok(())
}
