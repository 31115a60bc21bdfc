//! Key-value JSON persistence — the desktop analog of browser local storage.
//!
//! One JSON object file holds every key. The whole map is loaded once at
//! startup and rewritten on every `set`; concurrent writers (a second
//! instance) race with last-write-wins semantics and no detection, which is
//! the contract the stored keys were designed for.
//!
//! Reads never fail: a missing key, an unreadable file, or a value that does
//! not deserialize all fall back to the caller-supplied default.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

// Storage keys. The names are part of the on-disk schema; changing one
// orphans previously written state.
pub const TIMERS_KEY: &str = "nova_timers_v1";
pub const CLOCK_PREFS_KEY: &str = "nova_clock_prefs_v1";
pub const DARK_MODE_KEY: &str = "novaDarkMode";
pub const BACKGROUND_KEY: &str = "novaBackground";
pub const FONT_SIZE_KEY: &str = "novaFontSize";
pub const AUDIO_PREVIEW_KEY: &str = "novaAudioPreview";

/// Default font size when `novaFontSize` is missing or corrupt.
pub const DEFAULT_FONT_SIZE: u32 = 16;

pub struct Storage {
    /// Backing file; `None` keeps the store purely in memory (tests).
    path: Option<PathBuf>,
    values: BTreeMap<String, serde_json::Value>,
}

impl Storage {
    /// Open the per-user store under the platform config directory.
    pub fn open_default() -> Self {
        match dirs::config_dir() {
            Some(dir) => Self::open(dir.join("nova-dock").join("storage.json")),
            None => {
                log::warn!("no config directory available, settings will not persist");
                Self::in_memory()
            }
        }
    }

    /// Open (or lazily create) the store backed by `path`.
    ///
    /// A missing file is an empty store; a corrupt file is logged and
    /// treated as empty rather than surfaced.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    log::warn!("corrupt storage file {}: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self {
            path: Some(path),
            values,
        }
    }

    /// A store with no backing file. Used by tests and as the fallback when
    /// no config directory exists.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: BTreeMap::new(),
        }
    }

    /// Read `key`, or `None` if absent or not deserializable as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.values.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Read `key`, falling back to `default` on any failure. Never errors.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Write `key` and persist the whole map. Write failures are logged and
    /// swallowed; the in-memory value is updated regardless.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.values.insert(key.to_string(), v);
                if let Err(e) = self.persist() {
                    log::warn!("storage write failed for {key}: {e}");
                }
            }
            Err(e) => log::warn!("storage serialize failed for {key}: {e}"),
        }
    }

    /// Delete `key` (no-op if absent) and persist.
    pub fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            if let Err(e) = self.persist() {
                log::warn!("storage write failed after removing {key}: {e}");
            }
        }
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }

    #[cfg(test)]
    pub fn backing_path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_falls_back_to_default() {
        let store = Storage::in_memory();
        assert_eq!(store.get_or(FONT_SIZE_KEY, DEFAULT_FONT_SIZE), 16);
        assert_eq!(store.get_or(DARK_MODE_KEY, false), false);
    }

    #[test]
    fn corrupt_value_falls_back_to_default() {
        let mut store = Storage::in_memory();
        store.set(FONT_SIZE_KEY, &"not a number");
        assert_eq!(store.get_or(FONT_SIZE_KEY, DEFAULT_FONT_SIZE), 16);
    }

    #[test]
    fn corrupt_file_loads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{{{ not json").unwrap();

        let store = Storage::open(&path);
        assert_eq!(store.get_or(FONT_SIZE_KEY, DEFAULT_FONT_SIZE), 16);
    }

    #[test]
    fn set_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = Storage::open(&path);
        store.set(FONT_SIZE_KEY, &22u32);
        store.set(DARK_MODE_KEY, &true);
        assert!(store.backing_path().unwrap().exists());

        let reloaded = Storage::open(&path);
        assert_eq!(reloaded.get_or(FONT_SIZE_KEY, DEFAULT_FONT_SIZE), 22);
        assert!(reloaded.get_or(DARK_MODE_KEY, false));
    }

    #[test]
    fn remove_deletes_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = Storage::open(&path);
        store.set(BACKGROUND_KEY, &"data:image/png;base64,AAAA");
        store.remove(BACKGROUND_KEY);

        let reloaded = Storage::open(&path);
        assert_eq!(reloaded.get::<String>(BACKGROUND_KEY), None);
    }
}
