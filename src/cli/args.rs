use crate::app::PictureMode;
use crate::wallpaper::SortMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wallpick")]
#[command(author = "MrMattias")]
#[command(version)]
#[command(about = "Wallpaper picker with thumbnails, favorites and usage stats")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Apply a random wallpaper and exit
    #[arg(long)]
    pub(crate) shuffle: bool,

    /// Open the picker on the settings page
    #[arg(long)]
    pub(crate) settings: bool,

    /// Keep background changes in memory instead of calling gsettings
    #[arg(long, global = true)]
    pub(crate) dry_run: bool,

    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List wallpapers in catalog order
    List {
        /// Sort order
        #[arg(short, long, value_enum, default_value_t = SortMode::MostUsed)]
        sort: SortMode,
        /// Maximum entries (defaults to the configured max_images, 0 = all)
        #[arg(short, long)]
        max: Option<usize>,
        /// Show size, modification time and usage
        #[arg(short, long)]
        long: bool,
    },
    /// Set a wallpaper
    Apply {
        /// Path to image
        path: PathBuf,
        /// Display mode (defaults to the configured one)
        #[arg(short, long, value_enum)]
        mode: Option<PictureMode>,
    },
    /// Print the current wallpaper path
    Current,
    /// Print the cached thumbnail path for an image
    Thumb {
        /// Path to image
        path: PathBuf,
    },
    /// Manage the thumbnail cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Manage favorites
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },
    /// Show usage statistics
    Stats {
        /// Forget all usage counts
        #[arg(long)]
        reset: bool,
    },
    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Delete a wallpaper file from disk
    Delete {
        /// Path to image
        path: PathBuf,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum CacheAction {
    /// Show cache size
    Info,
    /// Remove all cached thumbnails
    Clear,
    /// Generate thumbnails for the whole catalog
    Warm,
}

#[derive(Subcommand)]
pub(crate) enum FavAction {
    /// List favorites
    List,
    /// Add a favorite (file name or path)
    Add { name: String },
    /// Remove a favorite (file name or path)
    Remove { name: String },
    /// Toggle a favorite (file name or path)
    Toggle { name: String },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the configuration
    Show,
    /// Add a wallpaper folder
    AddDir { dir: PathBuf },
    /// Remove a wallpaper folder
    RemoveDir { dir: PathBuf },
    /// Set max_images, picture_mode, columns or rows
    Set { key: String, value: String },
}
