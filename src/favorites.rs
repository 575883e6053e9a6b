use crate::store;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Favorite wallpapers by basename, persisted as a sorted JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    names: BTreeSet<String>,
}

impl Favorites {
    pub fn load(path: &Path) -> Self {
        store::read_json(path)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        store::write_json(path, self)
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.names.contains(filename)
    }

    /// Flip membership and return the new state.
    pub fn toggle(&mut self, filename: &str) -> bool {
        if self.names.remove(filename) {
            false
        } else {
            self.names.insert(filename.to_string());
            true
        }
    }

    pub fn add(&mut self, filename: &str) -> bool {
        self.names.insert(filename.to_string())
    }

    pub fn remove(&mut self, filename: &str) -> bool {
        self.names.remove(filename)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn toggle_reports_new_state() {
        let mut favs = Favorites::default();
        assert!(favs.toggle("a.jpg"));
        assert!(favs.contains("a.jpg"));
        assert!(!favs.toggle("a.jpg"));
        assert!(!favs.contains("a.jpg"));
    }

    #[test]
    fn saved_as_sorted_array() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("favorites.json");
        let mut favs = Favorites::default();
        favs.add("zebra.png");
        favs.add("apple.jpg");
        favs.save(&path)?;

        let raw: Vec<String> = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(raw, vec!["apple.jpg", "zebra.png"]);
        assert_eq!(Favorites::load(&path), favs);
        Ok(())
    }

    #[test]
    fn non_array_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        fs::write(&path, r#"{"a.jpg": true}"#).unwrap();
        assert!(Favorites::load(&path).is_empty());
    }
}
