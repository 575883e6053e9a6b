use crate::app::Config;
use crate::applier::Applier;
use crate::desktop::{BackgroundSettings, GSettings, MemorySettings};
use crate::favorites::Favorites;
use crate::paths::Paths;
use crate::stats::{Stats, StatsWriter};
use crate::store;
use crate::thumbnail::ThumbnailCache;
use crate::utils::file_name_of;
use crate::wallpaper::{self, ImageEntry, SortMode};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything one process needs, built once at startup and torn down on exit.
pub struct Services {
    pub paths: Paths,
    pub thumbnails: ThumbnailCache,
    pub applier: Applier,
    stats_writer: StatsWriter,
}

impl Services {
    /// Must be called inside the tokio runtime (spawns the stats writer).
    pub fn start(paths: Paths, dry_run: bool) -> Self {
        let settings: Box<dyn BackgroundSettings> = if dry_run {
            Box::new(MemorySettings::new())
        } else {
            Box::new(GSettings::connect())
        };
        Self::with_settings(paths, settings)
    }

    pub fn with_settings(paths: Paths, settings: Box<dyn BackgroundSettings>) -> Self {
        debug!(
            data = %paths.data_dir.display(),
            cache = %paths.cache_dir.display(),
            "starting services"
        );
        let stats_writer = StatsWriter::spawn(paths.stats_file());
        let applier = Applier::new(settings, stats_writer.recorder());
        let thumbnails = ThumbnailCache::new(paths.thumbs_dir());

        Self {
            paths,
            thumbnails,
            applier,
            stats_writer,
        }
    }

    pub fn load_config(&self) -> Config {
        Config::load(&self.paths.config_file())
    }

    pub fn save_config(&self, config: &Config) {
        store::write_json_or_warn(&self.paths.config_file(), config);
    }

    pub fn load_stats(&self) -> Stats {
        Stats::load(&self.paths.stats_file())
    }

    pub fn reset_stats(&self) {
        store::write_json_or_warn(&self.paths.stats_file(), &Stats::default());
    }

    pub fn load_favorites(&self) -> Favorites {
        Favorites::load(&self.paths.favorites_file())
    }

    pub fn save_favorites(&self, favorites: &Favorites) {
        store::write_json_or_warn(&self.paths.favorites_file(), favorites);
    }

    /// Catalog paths for `config`, reading the latest stats.
    pub fn scan(&self, config: &Config, sort: SortMode, favorites: &Favorites) -> Vec<PathBuf> {
        wallpaper::scan(
            &config.scan_dirs(),
            sort,
            config.max_images,
            &self.load_stats(),
            favorites,
        )
    }

    pub fn scan_entries(
        &self,
        config: &Config,
        sort: SortMode,
        max_images: usize,
    ) -> Vec<ImageEntry> {
        wallpaper::scan_entries(
            &config.scan_dirs(),
            sort,
            max_images,
            &self.load_stats(),
            &self.load_favorites(),
        )
    }

    /// Remove an image from disk and drop it from favorites. Nothing is
    /// touched when the file cannot be removed.
    pub fn delete_wallpaper(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("Failed to delete {}", path.display()))?;
        info!(path = %path.display(), "deleted wallpaper");

        let mut favorites = self.load_favorites();
        if favorites.remove(&file_name_of(path)) {
            self.save_favorites(&favorites);
        }
        Ok(())
    }

    /// Wait for queued stats writes (the UI re-sorts on fresh counts).
    pub async fn flush_stats(&self) {
        self.stats_writer.flush().await;
    }

    pub async fn shutdown(self) {
        self.stats_writer.shutdown().await;
        debug!("services stopped");
    }
}
