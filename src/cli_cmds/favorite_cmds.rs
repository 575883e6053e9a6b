use std::path::Path;

use crate::cli::FavAction;
use crate::services::Services;
use crate::utils::file_name_of;

/// Favorites are keyed by basename, so a full path works too.
fn favorite_key(name: &str) -> String {
    file_name_of(Path::new(name))
}

pub fn cmd_fav(services: &Services, action: FavAction) {
    let mut favorites = services.load_favorites();

    match action {
        FavAction::List => {
            if favorites.is_empty() {
                println!("No favorites yet.");
            }
            for name in favorites.iter() {
                println!("★ {name}");
            }
        }
        FavAction::Add { name } => {
            let key = favorite_key(&name);
            if favorites.add(&key) {
                services.save_favorites(&favorites);
                println!("★ {key}");
            } else {
                println!("{key} is already a favorite");
            }
        }
        FavAction::Remove { name } => {
            let key = favorite_key(&name);
            if favorites.remove(&key) {
                services.save_favorites(&favorites);
                println!("Removed {key}");
            } else {
                println!("{key} is not a favorite");
            }
        }
        FavAction::Toggle { name } => {
            let key = favorite_key(&name);
            let starred = favorites.toggle(&key);
            services.save_favorites(&favorites);
            if starred {
                println!("★ {key}");
            } else {
                println!("☆ {key}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_basename() {
        assert_eq!(favorite_key("/home/u/walls/a.jpg"), "a.jpg");
        assert_eq!(favorite_key("b.png"), "b.png");
    }
}
