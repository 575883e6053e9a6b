use super::core::format_timestamp;
use crate::services::Services;

pub async fn cmd_stats(services: &Services, reset: bool) {
    if reset {
        // Let pending records land first so they are not resurrected later
        services.flush_stats().await;
        services.reset_stats();
        println!("✓ Usage statistics cleared");
        return;
    }

    let stats = services.load_stats();
    if stats.is_empty() {
        println!("No wallpapers applied yet.");
        return;
    }

    println!("{:>5}  {:<16}  File", "Uses", "Last used");
    for (name, entry) in stats.ranked() {
        println!(
            "{:>5}  {:<16}  {}",
            entry.count,
            format_timestamp(entry.last_used),
            name
        );
    }
}
