use anyhow::Result;

use crate::cli::ConfigAction;
use crate::services::Services;
use crate::utils::{expand_tilde, shorten_path};

pub fn cmd_config(services: &Services, action: ConfigAction) -> Result<()> {
    let mut config = services.load_config();

    match action {
        ConfigAction::Show => {
            println!("{}", shorten_path(&services.paths.config_file()));
            println!("{}", config.describe());
        }
        ConfigAction::AddDir { dir } => {
            let dir = expand_tilde(&dir.to_string_lossy());
            if !dir.is_dir() {
                eprintln!("Warning: {} does not exist yet", dir.display());
            }
            if config.add_dir(dir.clone()) {
                services.save_config(&config);
                println!("✓ Added {}", shorten_path(&dir));
            } else {
                println!("{} is already configured", shorten_path(&dir));
            }
        }
        ConfigAction::RemoveDir { dir } => {
            let expanded = expand_tilde(&dir.to_string_lossy());
            if config.remove_dir(&dir) || config.remove_dir(&expanded) {
                services.save_config(&config);
                // Thumbnails of the removed folder would never be reused
                services.thumbnails.clear();
                println!("✓ Removed {}", shorten_path(&expanded));
            } else {
                println!("{} is not configured", shorten_path(&expanded));
            }
        }
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            services.save_config(&config);
            println!("{}", config.describe());
        }
    }

    Ok(())
}
