use crate::favorites::Favorites;
use crate::services::Services;
use crate::wallpaper::SortMode;
use crossterm::event;
use ratatui_image::{picker::Picker, protocol::StatefulProtocol};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::mpsc::SyncSender;

mod actions;
mod config;
mod filters;
mod navigation;
mod runtime;
mod settings;
mod thumbnails;

pub use config::{Config, PictureMode};
pub use runtime::run_tui;
pub use settings::SettingsRow;

/// Request to load a thumbnail in background
pub struct ThumbnailRequest {
    pub cache_idx: usize,
    pub source_path: PathBuf,
    pub generation: u64,
}

/// Response from thumbnail loading
pub struct ThumbnailResponse {
    pub cache_idx: usize,
    pub image: image::DynamicImage,
    pub generation: u64,
}

/// Events from background threads
pub enum AppEvent {
    Key(event::KeyEvent),
    ThumbnailReady(ThumbnailResponse),
    /// Decode failed for (cache_idx, generation)
    ThumbnailFailed(usize, u64),
    Resize,
    Tick,
}

/// Thumbnail cache size multiplier over the cards on one grid page.
const THUMBNAIL_CACHE_MULTIPLIER: usize = 3;

/// Which page the picker opens on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPage {
    Grid,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Grid,
    Settings,
}

/// Why the grid has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    NoFolders,
    NoFavorites,
    NoImages(Vec<PathBuf>),
    NoResults,
}

/// UI-related transient state (popups, prompts, messages).
pub struct UiState {
    pub page: Page,
    pub should_quit: bool,
    pub show_help: bool,
    pub status_message: Option<String>,
    /// Image waiting for delete confirmation
    pub confirm_delete: Option<PathBuf>,
    pub theme: crate::ui::theme::Theme,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            page: Page::Grid,
            should_quit: false,
            show_help: false,
            status_message: None,
            confirm_delete: None,
            theme: crate::ui::theme::Theme::gruvbox(),
        }
    }
}

/// Sort and search state.
#[derive(Default)]
pub struct FilterState {
    pub sort_mode: SortMode,
    pub search_mode: bool,
    pub query: String,
}

/// Selection navigation state.
#[derive(Default)]
pub struct SelectionState {
    /// Indices into `App::paths` that match the search
    pub filtered: Vec<usize>,
    /// Position in `filtered`
    pub idx: usize,
    /// First grid row on screen
    pub scroll_row: usize,
}

/// Settings page state.
#[derive(Default)]
pub struct SettingsState {
    pub row: usize,
    /// Text typed into the "add folder" prompt, when open
    pub prompt: Option<String>,
    pub cache_label: String,
}

/// Thumbnail rendering state.
pub struct ThumbnailState {
    pub image_picker: Option<Picker>,
    pub cache: HashMap<usize, Box<dyn StatefulProtocol>>,
    cache_order: Vec<usize>,
    pub loading: HashSet<usize>,
    /// Images that could not be decoded this generation
    failed: HashSet<usize>,
    request_tx: Option<SyncSender<ThumbnailRequest>>,
    generation: u64,
}

impl ThumbnailState {
    fn new(image_picker: Option<Picker>) -> Self {
        Self {
            image_picker,
            cache: HashMap::new(),
            cache_order: Vec::new(),
            loading: HashSet::new(),
            failed: HashSet::new(),
            request_tx: None,
            generation: 0,
        }
    }
}

pub struct App {
    pub services: Services,
    pub config: Config,
    pub favorites: Favorites,
    /// Catalog order, current wallpaper pinned first
    pub paths: Vec<PathBuf>,
    /// Applied wallpaper, empty when unknown
    pub current: PathBuf,
    pub ui: UiState,
    pub filters: FilterState,
    pub selection: SelectionState,
    pub settings: SettingsState,
    pub thumbnails: ThumbnailState,
}

impl App {
    /// Create the app and load the first catalog page.
    pub fn new(services: Services, start: StartPage) -> Self {
        Self::with_picker(services, start, Some(Self::new_thumbnail_picker()))
    }

    fn with_picker(services: Services, start: StartPage, image_picker: Option<Picker>) -> Self {
        let config = services.load_config();
        let favorites = services.load_favorites();
        let current = services.applier.current();

        let mut app = Self {
            services,
            config,
            favorites,
            paths: Vec::new(),
            current,
            ui: UiState::default(),
            filters: FilterState::default(),
            selection: SelectionState::default(),
            settings: SettingsState::default(),
            thumbnails: ThumbnailState::new(image_picker),
        };

        app.reload_catalog();
        if start == StartPage::Settings {
            app.open_settings();
        }
        app
    }

    /// Give the services back for teardown.
    pub fn into_services(self) -> Services {
        self.services
    }

    pub fn toggle_help(&mut self) {
        self.ui.show_help = !self.ui.show_help;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.ui.status_message = Some(message.into());
    }
}
