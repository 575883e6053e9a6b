use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod catalog;
mod model;

pub use catalog::{matches_query, pin_current, scan, scan_entries};
pub use model::image_info;

/// Sort order for the catalog
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
pub enum SortMode {
    /// Case-insensitive filename (A-Z)
    #[value(name = "az")]
    Alphabetical,
    /// Favorites only, A-Z
    Starred,
    /// Modification date, newest first
    Newest,
    /// Use count, highest first
    #[default]
    MostUsed,
    /// Last applied, latest first
    Recent,
}

impl SortMode {
    /// Return human-readable display name for this sort mode.
    pub fn display_name(&self) -> &'static str {
        match self {
            SortMode::Alphabetical => "A-Z",
            SortMode::Starred => "Starred",
            SortMode::Newest => "Newest",
            SortMode::MostUsed => "Most Used",
            SortMode::Recent => "Recent",
        }
    }

    /// Parse a display name back into a sort mode.
    pub fn from_display_name(label: &str) -> Option<Self> {
        [
            SortMode::Alphabetical,
            SortMode::Starred,
            SortMode::Newest,
            SortMode::MostUsed,
            SortMode::Recent,
        ]
        .into_iter()
        .find(|mode| mode.display_name().eq_ignore_ascii_case(label.trim()))
    }

    /// Cycle to the next sort mode.
    pub fn next(&self) -> Self {
        match self {
            SortMode::Alphabetical => SortMode::Starred,
            SortMode::Starred => SortMode::Newest,
            SortMode::Newest => SortMode::MostUsed,
            SortMode::MostUsed => SortMode::Recent,
            SortMode::Recent => SortMode::Alphabetical,
        }
    }
}

/// One image found by a scan. Recomputed every time, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    pub path: PathBuf,
    /// Basename; the identity used by stats and favorites
    pub filename: String,
    /// Seconds since the epoch, 0.0 when unreadable
    pub mtime: f64,
    pub size_bytes: u64,
}
