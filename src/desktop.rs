//! Host desktop background settings.
//!
//! [`GSettings`] talks to GNOME through the `gsettings` CLI;
//! [`MemorySettings`] keeps everything in-process for `--dry-run` and tests.

use std::collections::HashMap;
use std::io;
use std::process::Command;
use std::sync::Mutex;
use thiserror::Error;

pub const BACKGROUND_SCHEMA: &str = "org.gnome.desktop.background";
pub const KEY_PICTURE_URI: &str = "picture-uri";
pub const KEY_PICTURE_URI_DARK: &str = "picture-uri-dark";
pub const KEY_PICTURE_OPTIONS: &str = "picture-options";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("background settings are not available")]
    Unavailable,
    #[error("failed to run gsettings: {0}")]
    Spawn(#[from] io::Error),
    #[error("gsettings rejected {key}: {message}")]
    Rejected { key: String, message: String },
}

/// Key/value store holding the desktop background configuration.
pub trait BackgroundSettings: Send + Sync {
    fn is_available(&self) -> bool;

    /// Current value of `key`, `None` when unset or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// `gsettings` CLI on the GNOME background schema
#[derive(Debug)]
pub struct GSettings {
    schema: String,
    available: bool,
}

impl GSettings {
    /// Probe the schema once; an absent binary or schema marks the store
    /// unavailable.
    pub fn connect() -> Self {
        let available = Command::new("gsettings")
            .args(["list-keys", BACKGROUND_SCHEMA])
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false);
        if !available {
            tracing::debug!(schema = BACKGROUND_SCHEMA, "gsettings schema not found");
        }

        Self {
            schema: BACKGROUND_SCHEMA.to_string(),
            available,
        }
    }
}

impl BackgroundSettings for GSettings {
    fn is_available(&self) -> bool {
        self.available
    }

    fn get(&self, key: &str) -> Option<String> {
        if !self.available {
            return None;
        }
        let output = Command::new("gsettings")
            .args(["get", &self.schema, key])
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        Some(parse_gvariant_string(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        if !self.available {
            return Err(SettingsError::Unavailable);
        }
        let output = Command::new("gsettings")
            .args(["set", &self.schema, key, value])
            .output()?;
        if !output.status.success() {
            return Err(SettingsError::Rejected {
                key: key.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// `gsettings get` prints strings as quoted GVariant text: `'file:///a b.png'`.
fn parse_gvariant_string(raw: &str) -> String {
    let raw = raw.trim();
    let inner = raw
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')));

    match inner {
        Some(inner) => {
            let mut out = String::with_capacity(inner.len());
            let mut chars = inner.chars();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else {
                    out.push(c);
                }
            }
            out
        }
        None => raw.to_string(),
    }
}

/// In-process settings map
#[derive(Debug)]
pub struct MemorySettings {
    values: Mutex<HashMap<String, String>>,
    available: bool,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            available: true,
        }
    }

    /// A store that behaves like a desktop without the background schema.
    pub fn unavailable() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            available: false,
        }
    }
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundSettings for MemorySettings {
    fn is_available(&self) -> bool {
        self.available
    }

    fn get(&self, key: &str) -> Option<String> {
        if !self.available {
            return None;
        }
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        if !self.available {
            return Err(SettingsError::Unavailable);
        }
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gvariant_strings_are_unquoted() {
        assert_eq!(
            parse_gvariant_string("'file:///home/u/a%20b.png'\n"),
            "file:///home/u/a%20b.png"
        );
        assert_eq!(parse_gvariant_string(r"'it\'s.png'"), "it's.png");
        assert_eq!(parse_gvariant_string("zoom"), "zoom");
        assert_eq!(parse_gvariant_string("''"), "");
    }

    #[test]
    fn memory_settings_round_trip() {
        let settings = MemorySettings::new();
        assert_eq!(settings.get(KEY_PICTURE_URI), None);
        settings.set(KEY_PICTURE_URI, "file:///x.png").unwrap();
        assert_eq!(settings.get(KEY_PICTURE_URI).as_deref(), Some("file:///x.png"));
    }

    #[test]
    fn unavailable_store_rejects_writes() {
        let settings = MemorySettings::unavailable();
        assert!(!settings.is_available());
        assert!(matches!(
            settings.set(KEY_PICTURE_URI, "file:///x.png"),
            Err(SettingsError::Unavailable)
        ));
    }
}
