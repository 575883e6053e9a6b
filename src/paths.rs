//! Per-user directories for stores, thumbnails and the instance lock.

use std::path::{Path, PathBuf};

const DATA_DIR_ENV: &str = "WALLPICK_DATA_DIR";
const CACHE_DIR_ENV: &str = "WALLPICK_CACHE_DIR";
const RUNTIME_DIR_ENV: &str = "WALLPICK_RUNTIME_DIR";

/// Resolved directories for one process.
#[derive(Debug, Clone)]
pub struct Paths {
    pub data_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub runtime_dir: PathBuf,
}

impl Paths {
    /// Resolve XDG directories, honouring the `WALLPICK_*_DIR` overrides.
    pub fn resolve() -> Self {
        let project = directories::ProjectDirs::from("io", "wallpick", "wallpick");

        let data_dir = env_dir(DATA_DIR_ENV).unwrap_or_else(|| {
            project
                .as_ref()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("/tmp/wallpick/data"))
        });

        let cache_dir = env_dir(CACHE_DIR_ENV).unwrap_or_else(|| {
            project
                .as_ref()
                .map(|dirs| dirs.cache_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("/tmp/wallpick/cache"))
        });

        let runtime_dir = env_dir(RUNTIME_DIR_ENV)
            .or_else(|| env_dir("XDG_RUNTIME_DIR"))
            .unwrap_or_else(|| cache_dir.clone());

        Self {
            data_dir,
            cache_dir,
            runtime_dir,
        }
    }

    /// Lay every directory out under one root (tests, sandboxes).
    pub fn under(root: &Path) -> Self {
        Self {
            data_dir: root.join("data"),
            cache_dir: root.join("cache"),
            runtime_dir: root.join("run"),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    pub fn stats_file(&self) -> PathBuf {
        self.data_dir.join("stats.json")
    }

    pub fn favorites_file(&self) -> PathBuf {
        self.data_dir.join("favorites.json")
    }

    pub fn thumbs_dir(&self) -> PathBuf {
        self.cache_dir.join("thumbs")
    }

    pub fn log_file(&self) -> PathBuf {
        self.cache_dir.join("wallpick.log")
    }
}

fn env_dir(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
