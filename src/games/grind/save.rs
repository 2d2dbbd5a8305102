//! GitHub Grind save/load.
//!
//! The snapshot is a JSON envelope `{ "version", "game" }` stored under a
//! single key. Loading is a shallow merge over defaults: missing fields keep
//! their default value and unknown fields are ignored. There is no migration
//! beyond that. `version` is recorded so a future breaking change can detect
//! old saves.
//!
//! An unparsable snapshot counts as "no save": it is removed and the game
//! starts fresh.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::state::EconomyState;

pub const SAVE_VERSION: u32 = 1;

/// Key the snapshot is stored under.
pub const STORAGE_KEY: &str = "githubGrindSave";

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to serialize save data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage is unavailable")]
    Unavailable,

    #[error("failed to write to storage: {0}")]
    Write(String),
}

#[derive(Serialize, Deserialize)]
struct SaveData {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    game: EconomyState,
}

/// A string key-value store (browser `localStorage` or an in-memory map).
pub trait SaveStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError>;
    fn remove(&mut self, key: &str);
}

/// In-memory store. Used on native builds and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Browser `localStorage`. Looked up on every call so a storage that becomes
/// available later is still picked up.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        let storage = Self::storage().ok_or(SaveError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| SaveError::Write(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// The store the running game should use on this target.
pub fn default_store() -> Box<dyn SaveStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(LocalStorage)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(MemoryStore::new())
    }
}

pub fn to_json(state: &EconomyState) -> Result<String, SaveError> {
    let data = SaveData {
        version: SAVE_VERSION,
        game: state.clone(),
    };
    Ok(serde_json::to_string(&data)?)
}

/// Parse a snapshot, merging over defaults. `None` if it is not valid JSON
/// of the expected shape.
pub fn from_json(json: &str) -> Option<EconomyState> {
    let data: SaveData = match serde_json::from_str(json) {
        Ok(d) => d,
        Err(e) => {
            warn(&format!("GitHub Grind: failed to parse save data (discarding): {e}"));
            return None;
        }
    };
    if data.version > SAVE_VERSION {
        info(&format!(
            "GitHub Grind: save is from a newer version (saved={}, current={}); loading known fields.",
            data.version, SAVE_VERSION
        ));
    }
    let mut state = data.game;
    state.sanitize();
    Some(state)
}

pub fn save_game(store: &mut dyn SaveStore, state: &EconomyState) -> Result<(), SaveError> {
    let json = to_json(state)?;
    store.write(STORAGE_KEY, &json)
}

/// Restore the saved state, if there is a usable one. A corrupt snapshot is
/// deleted so the next start does not trip over it again.
pub fn load_game(store: &mut dyn SaveStore) -> Option<EconomyState> {
    let json = store.read(STORAGE_KEY)?;
    let state = from_json(&json);
    if state.is_none() {
        store.remove(STORAGE_KEY);
    }
    state
}

#[cfg(target_arch = "wasm32")]
fn warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(_msg: &str) {}

#[cfg(target_arch = "wasm32")]
fn info(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn info(_msg: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    fn played() -> EconomyState {
        let mut s = EconomyState::new();
        s.tick = 1234;
        s.tier_index = 3;
        s.career_index = 1;
        s.semester = 4;
        s.energy = 42.5;
        s.max_energy = 100.0;
        s.energy_regen = 9.5;
        s.skill = 88.25;
        s.reputation = 12_345.6;
        s.stars = 17.4;
        s.offers = 3;
        s.gpa = 3.45;
        s.coffee_level = 3;
        s.streak_level = 2;
        s
    }

    #[test]
    fn json_roundtrip() {
        let original = played();
        let json = to_json(&original).unwrap();
        let restored = from_json(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn store_roundtrip() {
        let mut store = MemoryStore::new();
        let original = played();
        save_game(&mut store, &original).unwrap();
        assert_eq!(load_game(&mut store), Some(original));
    }

    #[test]
    fn empty_store_loads_nothing() {
        let mut store = MemoryStore::new();
        assert_eq!(load_game(&mut store), None);
    }

    #[test]
    fn corrupt_save_is_discarded() {
        let mut store = MemoryStore::new();
        store.write(STORAGE_KEY, "{not json").unwrap();
        assert_eq!(load_game(&mut store), None);
        assert_eq!(store.read(STORAGE_KEY), None);
    }

    #[test]
    fn wrong_shape_is_discarded() {
        let mut store = MemoryStore::new();
        store.write(STORAGE_KEY, r#"{"version": 1, "game": {"skill": "lots"}}"#).unwrap();
        assert_eq!(load_game(&mut store), None);
        assert_eq!(store.read(STORAGE_KEY), None);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let json = r#"{
            "version": 1,
            "game": {
                "skill": 55.0,
                "reputation": 300.0,
                "coffee_level": 2
            }
        }"#;
        let s = from_json(json).unwrap();
        assert_eq!(s.skill, 55.0);
        assert_eq!(s.reputation, 300.0);
        assert_eq!(s.coffee_level, 2);
        // Absent → defaults
        assert_eq!(s.energy, 100.0);
        assert_eq!(s.gpa, 3.0);
        assert_eq!(s.semester, 1);
        assert_eq!(s.streak_level, 0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{
            "version": 1,
            "game": { "offers": 4, "future_unknown_field": "should be ignored" },
            "extra": true
        }"#;
        let s = from_json(json).unwrap();
        assert_eq!(s.offers, 4);
    }

    #[test]
    fn newer_version_still_loads() {
        let json = r#"{ "version": 99, "game": { "stars": 8.0 } }"#;
        let s = from_json(json).unwrap();
        assert_eq!(s.stars, 8.0);
    }

    #[test]
    fn loaded_values_are_sanitized() {
        let json = r#"{ "version": 1, "game": { "energy": 900.0, "gpa": 1.0 } }"#;
        let s = from_json(json).unwrap();
        assert_eq!(s.energy, 100.0);
        assert_eq!(s.gpa, 2.0);
    }
}
