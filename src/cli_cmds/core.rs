use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::Path;

use crate::app::PictureMode;
use crate::services::Services;
use crate::utils::{format_bytes, is_image_file, shorten_path};
use crate::wallpaper::{image_info, SortMode};

pub fn cmd_shuffle(services: &Services) -> Result<()> {
    let config = services.load_config();
    let dirs = config.scan_dirs();

    match services.applier.shuffle(&dirs, config.picture_mode) {
        Some(path) => println!("{}", path.display()),
        None => {
            let shown: Vec<String> = dirs.iter().map(|d| shorten_path(d)).collect();
            bail!("No wallpapers found in: {}", shown.join(", "));
        }
    }
    Ok(())
}

pub fn cmd_list(
    services: &Services,
    sort: SortMode,
    max: Option<usize>,
    long: bool,
) -> Result<()> {
    let config = services.load_config();
    let max = max.unwrap_or(config.max_images);
    let entries = services.scan_entries(&config, sort, max);

    if entries.is_empty() {
        eprintln!("No wallpapers found.");
        eprintln!("Add a folder with 'wallpick config add-dir <dir>'.");
        return Ok(());
    }

    if !long {
        for entry in &entries {
            println!("{}", entry.path.display());
        }
        return Ok(());
    }

    let stats = services.load_stats();
    let favorites = services.load_favorites();
    for entry in &entries {
        let star = if favorites.contains(&entry.filename) {
            "★"
        } else {
            " "
        };
        println!(
            "{star} {:>4}  {:>9}  {}  {}",
            stats.count(&entry.filename),
            format_bytes(entry.size_bytes),
            format_timestamp(entry.mtime),
            shorten_path(&entry.path)
        );
    }
    println!("{} wallpaper(s), sorted by {}", entries.len(), sort.display_name());
    Ok(())
}

pub fn cmd_apply(services: &Services, path: &Path, mode: Option<PictureMode>) -> Result<()> {
    if !path.is_file() || !is_image_file(path) {
        bail!("Not an image file: {}", path.display());
    }
    if !services.applier.is_available() {
        bail!("GNOME background settings are not available on this desktop");
    }

    let mode = mode.unwrap_or(services.load_config().picture_mode);
    services.applier.apply(path, mode);
    println!("✓ {} ({})", path.display(), mode.display_name());
    Ok(())
}

pub fn cmd_current(services: &Services) {
    let current = services.applier.current();
    if current.as_os_str().is_empty() {
        eprintln!("No wallpaper set.");
        return;
    }
    println!("{}", current.display());
    if current.is_file() {
        println!("  {}", image_info(&current));
    }
}

pub fn cmd_thumb(services: &Services, path: &Path) -> Result<()> {
    if !path.is_file() || !is_image_file(path) {
        bail!("Not an image file: {}", path.display());
    }
    // Cache keys hash the absolute path, as the catalog produces them.
    let path = std::path::absolute(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    println!("{}", services.thumbnails.get_thumbnail(&path).display());
    Ok(())
}

pub fn cmd_delete(services: &Services, path: &Path, yes: bool) -> Result<()> {
    if !path.is_file() || !is_image_file(path) {
        bail!("Not an image file: {}", path.display());
    }

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Permanently delete {}?",
                shorten_path(path)
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    services.delete_wallpaper(path)?;
    println!("✓ Deleted {}", shorten_path(path));
    Ok(())
}

pub(super) fn format_timestamp(secs: f64) -> String {
    if secs <= 0.0 {
        return "never".to_string();
    }
    DateTime::from_timestamp(secs as i64, 0)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
