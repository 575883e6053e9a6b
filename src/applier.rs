use crate::app::PictureMode;
use crate::desktop::{
    BackgroundSettings, KEY_PICTURE_OPTIONS, KEY_PICTURE_URI, KEY_PICTURE_URI_DARK,
};
use crate::favorites::Favorites;
use crate::stats::{Stats, StatsRecorder};
use crate::wallpaper::{self, SortMode};
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;

/// Reads and writes the desktop background, recording every apply.
pub struct Applier {
    settings: Box<dyn BackgroundSettings>,
    recorder: StatsRecorder,
}

impl Applier {
    pub fn new(settings: Box<dyn BackgroundSettings>, recorder: StatsRecorder) -> Self {
        Self { settings, recorder }
    }

    pub fn is_available(&self) -> bool {
        self.settings.is_available()
    }

    /// Path of the applied wallpaper. Empty when unset or not a file URI.
    pub fn current(&self) -> PathBuf {
        [KEY_PICTURE_URI_DARK, KEY_PICTURE_URI]
            .into_iter()
            .filter_map(|key| self.settings.get(key))
            .find(|uri| !uri.is_empty())
            .and_then(|uri| uri_to_path(&uri))
            .unwrap_or_default()
    }

    /// Hand `path` to the desktop and queue a stats update.
    ///
    /// Returns false (and changes nothing) when the file is missing or the
    /// desktop exposes no background settings. Individual key writes that
    /// fail are logged and otherwise ignored.
    pub fn apply(&self, path: &Path, mode: PictureMode) -> bool {
        if !self.settings.is_available() {
            debug!("background settings unavailable, not applying");
            return false;
        }
        if !path.is_file() {
            debug!(path = %path.display(), "not a regular file, not applying");
            return false;
        }

        match path_to_uri(path) {
            Some(uri) => {
                for (key, value) in [
                    (KEY_PICTURE_URI, uri.as_str()),
                    (KEY_PICTURE_URI_DARK, uri.as_str()),
                    (KEY_PICTURE_OPTIONS, mode.as_option()),
                ] {
                    if let Err(err) = self.settings.set(key, value) {
                        warn!(key, %err, "failed to write background setting");
                    }
                }
                info!(path = %path.display(), mode = mode.as_option(), "applied wallpaper");
            }
            None => warn!(path = %path.display(), "could not build a file URI"),
        }

        self.recorder.record_use(path);
        true
    }

    /// Pick a random image from an A-Z scan of `dirs` and apply it.
    pub fn shuffle(&self, dirs: &[PathBuf], mode: PictureMode) -> Option<PathBuf> {
        let images = wallpaper::scan(
            dirs,
            SortMode::Alphabetical,
            0,
            &Stats::default(),
            &Favorites::default(),
        );
        let choice = images.choose(&mut rand::thread_rng())?.clone();
        self.apply(&choice, mode);
        Some(choice)
    }
}

/// Symlinks are kept as-is so the URI matches the catalog path.
fn path_to_uri(path: &Path) -> Option<Url> {
    let absolute = std::path::absolute(path).ok()?;
    Url::from_file_path(absolute).ok()
}

fn uri_to_path(uri: &str) -> Option<PathBuf> {
    Url::parse(uri).ok()?.to_file_path().ok()
}
