use super::{App, ThumbnailRequest, ThumbnailResponse, THUMBNAIL_CACHE_MULTIPLIER};
use ratatui_image::{picker::Picker, protocol::StatefulProtocol};
use std::sync::mpsc::SyncSender;

const THUMBNAIL_MAX_IN_FLIGHT_MULTIPLIER: usize = 2;

fn is_kitty_terminal() -> bool {
    std::env::var("TERM")
        .map(|t| t.contains("kitty"))
        .unwrap_or(false)
        || std::env::var("KITTY_WINDOW_ID").is_ok()
}

impl App {
    /// Request a thumbnail to be loaded in background.
    pub fn request_thumbnail(&mut self, cache_idx: usize) {
        let Some(source_path) = self.paths.get(cache_idx).cloned() else {
            return;
        };

        if self.thumbnails.cache.contains_key(&cache_idx)
            || self.thumbnails.loading.contains(&cache_idx)
            || self.thumbnails.failed.contains(&cache_idx)
        {
            return;
        }

        if self.thumbnails.loading.len() >= self.max_in_flight_thumbnail_requests() {
            return;
        }

        if let Some(tx) = &self.thumbnails.request_tx {
            let request = ThumbnailRequest {
                cache_idx,
                source_path,
                generation: self.thumbnails.generation,
            };
            if tx.try_send(request).is_ok() {
                self.thumbnails.loading.insert(cache_idx);
            }
        }
    }

    /// Cap on decoded thumbnails kept in memory.
    /// Stays below the Kitty protocol's u8 image ID limit so IDs never wrap.
    fn max_thumbnail_cache(&self) -> usize {
        (self.config.page_size().max(1) * THUMBNAIL_CACHE_MULTIPLIER).clamp(24, 200)
    }

    fn max_in_flight_thumbnail_requests(&self) -> usize {
        let cols = self.config.columns.max(1);
        (cols * THUMBNAIL_MAX_IN_FLIGHT_MULTIPLIER).clamp(6, 12)
    }

    pub(super) fn new_thumbnail_picker() -> Picker {
        let mut picker = Picker::from_termios().unwrap_or_else(|_| Picker::new((8, 16)));
        picker.guess_protocol();
        picker
    }

    /// Clear in-memory thumbnail state and purge terminal-side image IDs.
    pub(super) fn reset_thumbnail_cache(&mut self) {
        Self::clear_terminal_images();
        self.thumbnails.cache.clear();
        self.thumbnails.cache_order.clear();
        self.thumbnails.loading.clear();
        self.thumbnails.failed.clear();
        self.thumbnails.generation = self.thumbnails.generation.wrapping_add(1);

        if is_kitty_terminal() && self.thumbnails.image_picker.is_some() {
            self.thumbnails.image_picker = Some(Self::new_thumbnail_picker());
        }
    }

    /// Handle a loaded thumbnail from the worker thread.
    pub fn handle_thumbnail_ready(&mut self, response: ThumbnailResponse) {
        if response.generation != self.thumbnails.generation {
            return;
        }

        self.thumbnails.loading.remove(&response.cache_idx);

        if response.cache_idx >= self.paths.len() {
            return;
        }

        // ratatui-image never frees terminal-side images when a protocol is
        // dropped, so a full cache is purged wholesale. Visible cards are
        // re-requested on the next frame from the disk cache.
        if self.thumbnails.cache.len() >= self.max_thumbnail_cache() {
            self.reset_thumbnail_cache();
            return;
        }

        if let Some(picker) = &mut self.thumbnails.image_picker {
            let protocol = picker.new_resize_protocol(response.image);
            self.thumbnails.cache.insert(response.cache_idx, protocol);
            self.thumbnails.cache_order.push(response.cache_idx);
        }
    }

    /// Stop asking for an image the worker could not decode.
    pub fn handle_thumbnail_failed(&mut self, cache_idx: usize, generation: u64) {
        if generation != self.thumbnails.generation {
            return;
        }
        self.thumbnails.loading.remove(&cache_idx);
        self.thumbnails.failed.insert(cache_idx);
    }

    /// Purge all Kitty graphics protocol images from the terminal.
    ///
    /// Sends `APC G a=d,d=A ST`. Other terminals never see it.
    fn clear_terminal_images() {
        if !is_kitty_terminal() {
            return;
        }
        use std::io::Write;
        let _ = std::io::stdout().write_all(b"\x1b_Ga=d,d=A\x1b\\");
        let _ = std::io::stdout().flush();
    }

    /// Ready thumbnail for a card, bumping it in the LRU order.
    pub fn get_thumbnail(&mut self, cache_idx: usize) -> Option<&mut Box<dyn StatefulProtocol>> {
        if self.thumbnails.cache.contains_key(&cache_idx) {
            if let Some(pos) = self
                .thumbnails
                .cache_order
                .iter()
                .position(|&i| i == cache_idx)
            {
                self.thumbnails.cache_order.remove(pos);
                self.thumbnails.cache_order.push(cache_idx);
            }
        }
        self.thumbnails.cache.get_mut(&cache_idx)
    }

    pub fn is_loading(&self, cache_idx: usize) -> bool {
        self.thumbnails.loading.contains(&cache_idx)
    }

    pub fn set_thumb_channel(&mut self, tx: SyncSender<ThumbnailRequest>) {
        self.thumbnails.request_tx = Some(tx);
    }

    /// Handle terminal resize: protocols are sized for the old cell
    /// metrics, so drop them and re-detect the font size.
    pub fn handle_resize(&mut self) {
        self.reset_thumbnail_cache();
        if self.thumbnails.image_picker.is_some() {
            self.thumbnails.image_picker = Some(Self::new_thumbnail_picker());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::app_with_images;
    use std::sync::mpsc;

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("wp-{i:02}.png")).collect()
    }

    fn app_with(count: usize, root: &std::path::Path) -> App {
        let names = names(count);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        app_with_images(root, &refs)
    }

    #[tokio::test]
    async fn max_thumbnail_cache_is_clamped_to_prevent_id_wrap() {
        let root = tempfile::tempdir().unwrap();
        let mut app = app_with(0, root.path());

        app.config.columns = 2;
        app.config.rows = 2;
        assert_eq!(app.max_thumbnail_cache(), 24);

        app.config.columns = 1_000;
        app.config.rows = 1_000;
        assert_eq!(app.max_thumbnail_cache(), 200);
    }

    #[tokio::test]
    async fn in_flight_thumbnail_requests_are_bounded() {
        let root = tempfile::tempdir().unwrap();
        let mut app = app_with(32, root.path());
        app.config.columns = 3;

        let max_in_flight = app.max_in_flight_thumbnail_requests();
        let (tx, _rx) = mpsc::sync_channel(64);
        app.set_thumb_channel(tx);

        for idx in 0..max_in_flight {
            app.request_thumbnail(idx);
        }
        assert_eq!(app.thumbnails.loading.len(), max_in_flight);

        app.request_thumbnail(max_in_flight + 1);
        assert_eq!(app.thumbnails.loading.len(), max_in_flight);
        assert!(!app.is_loading(max_in_flight + 1));
    }

    #[tokio::test]
    async fn request_thumbnail_does_not_mark_loading_when_queue_is_full() {
        let root = tempfile::tempdir().unwrap();
        let mut app = app_with(2, root.path());
        let (tx, _rx) = mpsc::sync_channel(1);
        app.set_thumb_channel(tx);

        app.request_thumbnail(0);
        assert!(app.is_loading(0));

        app.request_thumbnail(1);
        assert!(!app.is_loading(1));
    }

    #[tokio::test]
    async fn out_of_range_requests_are_ignored() {
        let root = tempfile::tempdir().unwrap();
        let mut app = app_with(1, root.path());
        let (tx, _rx) = mpsc::sync_channel(4);
        app.set_thumb_channel(tx);

        app.request_thumbnail(5);
        assert!(app.thumbnails.loading.is_empty());
    }

    #[tokio::test]
    async fn handle_thumbnail_ready_ignores_stale_generation() {
        let root = tempfile::tempdir().unwrap();
        let mut app = app_with(1, root.path());
        app.thumbnails.generation = 2;
        app.thumbnails.loading.insert(0);

        app.handle_thumbnail_ready(ThumbnailResponse {
            cache_idx: 0,
            image: image::DynamicImage::new_rgba8(1, 1),
            generation: 1,
        });

        assert!(app.is_loading(0));
        assert!(app.thumbnails.cache.is_empty());
    }

    #[tokio::test]
    async fn handle_thumbnail_ready_current_generation_clears_loading() {
        let root = tempfile::tempdir().unwrap();
        let mut app = app_with(1, root.path());
        app.thumbnails.generation = 7;
        app.thumbnails.loading.insert(0);

        app.handle_thumbnail_ready(ThumbnailResponse {
            cache_idx: 0,
            image: image::DynamicImage::new_rgba8(1, 1),
            generation: 7,
        });

        assert!(!app.is_loading(0));
    }

    #[tokio::test]
    async fn failed_thumbnails_free_their_slot_and_are_not_retried() {
        let root = tempfile::tempdir().unwrap();
        let mut app = app_with(2, root.path());
        let (tx, rx) = mpsc::sync_channel(8);
        app.set_thumb_channel(tx);

        app.request_thumbnail(0);
        let generation = rx.try_recv().unwrap().generation;
        app.handle_thumbnail_failed(0, generation);
        assert!(!app.is_loading(0));

        app.request_thumbnail(0);
        assert!(rx.try_recv().is_err());

        app.reload_catalog();
        app.request_thumbnail(0);
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn rescan_bumps_generation() {
        let root = tempfile::tempdir().unwrap();
        let mut app = app_with(3, root.path());
        let before = app.thumbnails.generation;
        app.reload_catalog();
        assert_ne!(app.thumbnails.generation, before);
    }
}
