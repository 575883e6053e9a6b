use crate::store;
use crate::utils::{expand_tilde, shorten_path};
use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

pub const MAX_IMAGES_LIMIT: usize = 2000;
pub const MAX_IMAGES_STEP: usize = 10;
pub const GRID_MIN: usize = 2;
pub const GRID_MAX: usize = 8;
const DEFAULT_GRID: usize = 3;
const DEFAULT_WALL_DIR: &str = "~/Pictures/Wallpapers";

/// How the desktop stretches the image (`picture-options` value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
pub enum PictureMode {
    #[default]
    #[serde(rename = "zoom")]
    Zoom,
    #[serde(rename = "stretched")]
    Stretch,
    #[serde(rename = "centered")]
    Center,
    #[serde(rename = "wallpaper")]
    Tile,
    #[serde(rename = "spanned")]
    Span,
}

impl PictureMode {
    pub const ALL: [PictureMode; 5] = [
        PictureMode::Zoom,
        PictureMode::Stretch,
        PictureMode::Center,
        PictureMode::Tile,
        PictureMode::Span,
    ];

    /// Value written to the host's `picture-options` key
    pub fn as_option(&self) -> &'static str {
        match self {
            PictureMode::Zoom => "zoom",
            PictureMode::Stretch => "stretched",
            PictureMode::Center => "centered",
            PictureMode::Tile => "wallpaper",
            PictureMode::Span => "spanned",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PictureMode::Zoom => "Zoom",
            PictureMode::Stretch => "Stretch",
            PictureMode::Center => "Center",
            PictureMode::Tile => "Tile",
            PictureMode::Span => "Span",
        }
    }

    /// Accepts either the host option string or the label, any case.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_option() == value || mode.display_name().to_lowercase() == value)
    }

    pub fn next(&self) -> Self {
        match self {
            PictureMode::Zoom => PictureMode::Stretch,
            PictureMode::Stretch => PictureMode::Center,
            PictureMode::Center => PictureMode::Tile,
            PictureMode::Tile => PictureMode::Span,
            PictureMode::Span => PictureMode::Zoom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub wall_dirs: Vec<PathBuf>,
    pub max_images: usize,
    pub picture_mode: PictureMode,
    pub columns: usize,
    pub rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wall_dirs: Vec::new(),
            max_images: 0,
            picture_mode: PictureMode::Zoom,
            columns: DEFAULT_GRID,
            rows: DEFAULT_GRID,
        }
    }
}

/// Fields shared by every on-disk layout. Numbers may be stored as strings.
#[derive(Debug, Default, Deserialize)]
struct CommonFields {
    #[serde(default, deserialize_with = "lenient_usize")]
    max_images: Option<usize>,
    #[serde(default)]
    picture_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient_usize")]
    columns: Option<usize>,
    #[serde(default, deserialize_with = "lenient_usize")]
    rows: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct CurrentLayout {
    wall_dirs: Vec<String>,
    #[serde(flatten)]
    common: CommonFields,
}

/// Before multi-folder support the file held one `wall_dir` string.
#[derive(Debug, Deserialize)]
struct LegacyLayout {
    wall_dir: String,
    #[serde(flatten)]
    common: CommonFields,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigFile {
    Current(CurrentLayout),
    Legacy(LegacyLayout),
    Bare(CommonFields),
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile::Bare(CommonFields::default())
    }
}

fn lenient_usize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .or_else(|| n.as_i64().map(|_| 0))
            .map(|n| n as usize),
        serde_json::Value::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    })
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        let (dirs, common) = match file {
            ConfigFile::Current(layout) => (layout.wall_dirs, layout.common),
            ConfigFile::Legacy(layout) => (vec![layout.wall_dir], layout.common),
            ConfigFile::Bare(common) => (Vec::new(), common),
        };

        let defaults = Config::default();
        let mut config = Config {
            wall_dirs: Vec::new(),
            max_images: common.max_images.unwrap_or(defaults.max_images),
            picture_mode: common
                .picture_mode
                .as_deref()
                .and_then(PictureMode::parse)
                .unwrap_or_default(),
            columns: common.columns.unwrap_or(defaults.columns),
            rows: common.rows.unwrap_or(defaults.rows),
        };
        for dir in dirs.iter().filter(|d| !d.trim().is_empty()) {
            config.add_dir(PathBuf::from(dir));
        }
        config.normalize();
        config
    }
}

impl Config {
    /// Load from disk. Missing or corrupt files give the default.
    pub fn load(path: &Path) -> Self {
        Config::from(store::read_json::<ConfigFile>(path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        store::write_json(path, self)
    }

    fn normalize(&mut self) {
        self.max_images = self.max_images.min(MAX_IMAGES_LIMIT);
        self.columns = self.columns.clamp(GRID_MIN, GRID_MAX);
        self.rows = self.rows.clamp(GRID_MIN, GRID_MAX);
    }

    /// Append a folder. Returns false when it is already listed.
    pub fn add_dir(&mut self, dir: PathBuf) -> bool {
        if self.wall_dirs.contains(&dir) {
            return false;
        }
        self.wall_dirs.push(dir);
        true
    }

    /// Remove a folder by value. Returns false when it was not listed.
    pub fn remove_dir(&mut self, dir: &Path) -> bool {
        let before = self.wall_dirs.len();
        self.wall_dirs.retain(|d| d != dir);
        self.wall_dirs.len() != before
    }

    /// Directories to scan: the configured ones, or the default folder.
    pub fn scan_dirs(&self) -> Vec<PathBuf> {
        if self.wall_dirs.is_empty() {
            return vec![expand_tilde(DEFAULT_WALL_DIR)];
        }
        self.wall_dirs
            .iter()
            .map(|d| expand_tilde(&d.to_string_lossy()))
            .collect()
    }

    pub fn step_max_images(&mut self, up: bool) {
        self.max_images = if up {
            (self.max_images + MAX_IMAGES_STEP).min(MAX_IMAGES_LIMIT)
        } else {
            self.max_images.saturating_sub(MAX_IMAGES_STEP)
        };
    }

    pub fn step_columns(&mut self, up: bool) {
        self.columns = step_grid(self.columns, up);
    }

    pub fn step_rows(&mut self, up: bool) {
        self.rows = step_grid(self.rows, up);
    }

    /// Images shown per grid page
    pub fn page_size(&self) -> usize {
        self.columns * self.rows
    }

    /// Set one key from its textual form (used by `config set`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "max_images" => self.max_images = parse_number(key, value)?,
            "columns" => self.columns = parse_number(key, value)?,
            "rows" => self.rows = parse_number(key, value)?,
            "picture_mode" => match PictureMode::parse(value) {
                Some(mode) => self.picture_mode = mode,
                None => bail!("Unknown picture mode: {value}"),
            },
            _ => bail!("Unknown config key: {key} (expected max_images, picture_mode, columns or rows)"),
        }
        self.normalize();
        Ok(())
    }

    /// Human-readable dump for `config show`
    pub fn describe(&self) -> String {
        let dirs = if self.wall_dirs.is_empty() {
            format!("  (none, scanning {DEFAULT_WALL_DIR})")
        } else {
            self.wall_dirs
                .iter()
                .map(|d| format!("  {}", shorten_path(d)))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let max = if self.max_images == 0 {
            "unlimited".to_string()
        } else {
            self.max_images.to_string()
        };

        format!(
            "Folders:\n{dirs}\nmax_images:   {max}\npicture_mode: {}\ncolumns:      {}\nrows:         {}",
            self.picture_mode.as_option(),
            self.columns,
            self.rows
        )
    }
}

fn step_grid(value: usize, up: bool) -> usize {
    if up {
        (value + 1).min(GRID_MAX)
    } else {
        value.saturating_sub(1).max(GRID_MIN)
    }
}

fn parse_number(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) => Ok(n),
        Err(_) => bail!("{key} expects a non-negative integer, got {value:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn load_str(json: &str) -> Config {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, json).unwrap();
        Config::load(&path)
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.columns, 3);
        assert_eq!(config.rows, 3);
    }

    #[test]
    fn corrupt_file_is_default() {
        assert_eq!(load_str("[1, 2"), Config::default());
        assert_eq!(load_str("\"just a string\""), Config::default());
    }

    #[test]
    fn legacy_wall_dir_migrates_in_memory() {
        let config = load_str(r#"{"wall_dir": "/x", "columns": 4}"#);
        assert_eq!(config.wall_dirs, vec![PathBuf::from("/x")]);
        assert_eq!(config.columns, 4);
    }

    #[test]
    fn current_layout_wins_over_legacy_key() {
        let config = load_str(r#"{"wall_dir": "/old", "wall_dirs": ["/a", "/b", "/a"]}"#);
        assert_eq!(
            config.wall_dirs,
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn values_are_coerced_and_clamped() {
        let config = load_str(
            r#"{"wall_dirs": [], "max_images": 99999, "columns": "12", "rows": 1, "picture_mode": "bogus"}"#,
        );
        assert_eq!(config.max_images, MAX_IMAGES_LIMIT);
        assert_eq!(config.columns, GRID_MAX);
        assert_eq!(config.rows, GRID_MIN);
        assert_eq!(config.picture_mode, PictureMode::Zoom);
    }

    #[test]
    fn save_then_load_keeps_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("data/config.json");
        let mut config = Config::default();
        assert!(config.add_dir(PathBuf::from("/b")));
        assert!(config.add_dir(PathBuf::from("/a")));
        assert!(!config.add_dir(PathBuf::from("/b")));
        config.picture_mode = PictureMode::Span;
        config.save(&path)?;

        let loaded = Config::load(&path);
        assert_eq!(loaded, config);
        let raw = fs::read_to_string(&path)?;
        assert!(raw.contains("\"spanned\""));
        Ok(())
    }

    #[test]
    fn empty_dirs_scan_default_folder() {
        let config = Config::default();
        let dirs = config.scan_dirs();
        assert_eq!(dirs.len(), 1);
        assert!(dirs[0].ends_with("Pictures/Wallpapers"));
    }

    #[test]
    fn steppers_respect_bounds() {
        let mut config = Config::default();
        config.step_max_images(false);
        assert_eq!(config.max_images, 0);
        config.max_images = 1995;
        config.step_max_images(true);
        assert_eq!(config.max_images, MAX_IMAGES_LIMIT);

        config.columns = GRID_MAX;
        config.step_columns(true);
        assert_eq!(config.columns, GRID_MAX);
        config.rows = GRID_MIN;
        config.step_rows(false);
        assert_eq!(config.rows, GRID_MIN);
    }

    #[test]
    fn set_by_key() -> Result<()> {
        let mut config = Config::default();
        config.set("picture_mode", "Tile")?;
        assert_eq!(config.picture_mode.as_option(), "wallpaper");
        config.set("columns", "5")?;
        assert_eq!(config.columns, 5);
        assert!(config.set("columns", "-1").is_err());
        assert!(config.set("colour", "red").is_err());
        Ok(())
    }

    #[test]
    fn picture_mode_cycles_through_all() {
        let mut mode = PictureMode::Zoom;
        for _ in 0..PictureMode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, PictureMode::Zoom);
        assert_eq!(PictureMode::parse("CENTERED"), Some(PictureMode::Center));
    }
}
