use crate::cli::CacheAction;
use crate::services::Services;
use crate::utils::{format_bytes, shorten_path};
use crate::wallpaper::SortMode;

pub fn cmd_cache(services: &Services, action: CacheAction) {
    let cache = &services.thumbnails;

    match action {
        CacheAction::Info => {
            let (bytes, files) = cache.cache_info();
            println!("{}", shorten_path(cache.cache_dir()));
            println!("Cache: {} ({} files)", format_bytes(bytes), files);
        }
        CacheAction::Clear => {
            if cache.clear() {
                println!("✓ Thumbnail cache cleared");
            } else {
                eprintln!("Failed to clear {}", cache.cache_dir().display());
            }
        }
        CacheAction::Warm => {
            let config = services.load_config();
            let entries = services.scan_entries(&config, SortMode::Alphabetical, 0);
            let paths: Vec<_> = entries.into_iter().map(|e| e.path).collect();

            println!("Generating thumbnails for {} wallpaper(s)...", paths.len());
            let made = cache.warm(&paths);
            let (bytes, files) = cache.cache_info();
            println!("✓ {made}/{} cached", paths.len());
            println!("Cache: {} ({} files)", format_bytes(bytes), files);
        }
    }
}
