use std::path::{Path, PathBuf};

/// Supported image file extensions (lowercase, without the dot)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "tiff", "tif", "avif"];

/// Longest display name shown under a thumbnail before it gets an ellipsis
const DISPLAY_NAME_MAX: usize = 20;

/// Check if a file name carries a supported image extension
pub fn is_image_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// Check if a path is a supported image file
pub fn is_image_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(is_image_name)
        .unwrap_or(false)
}

/// Basename of a path as an owned string ("" when there is none)
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Expand tilde (~) in path
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Replace the home directory prefix with `~` for display
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            if rest.as_os_str().is_empty() {
                return "~".to_string();
            }
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}

/// Human-friendly card label: no extension, separators as spaces, truncated.
pub fn display_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let name = stem.replace(['-', '_'], " ");
    let name = name.trim();

    if name.chars().count() > DISPLAY_NAME_MAX {
        let cut: String = name.chars().take(DISPLAY_NAME_MAX).collect();
        format!("{}\u{2026}", cut.trim_end())
    } else {
        name.to_string()
    }
}

/// Format a byte count as KB/MB with one decimal
pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.0} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}
