//! Flat JSON documents under the data directory.
//!
//! Reads never fail: a missing or malformed file yields the type's default.
//! Writes overwrite the whole file and report errors to the caller, which
//! usually just logs them (see [`write_json_or_warn`]).

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Load a JSON document, falling back to `T::default()` on any error.
pub fn read_json<T: DeserializeOwned + Default>(path: &Path) -> T {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "store file missing, using defaults");
            return T::default();
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to read store file");
            return T::default();
        }
    };

    match serde_json::from_str(&data) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), %err, "malformed store file, using defaults");
            T::default()
        }
    }
}

/// Serialize and overwrite a JSON document, creating its directory.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(value)?;
    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Best-effort write: failures are logged and dropped.
pub fn write_json_or_warn<T: Serialize>(path: &Path, value: &T) {
    if let Err(err) = write_json(path, value) {
        warn!(path = %path.display(), "dropping store write: {err:#}");
    }
}
