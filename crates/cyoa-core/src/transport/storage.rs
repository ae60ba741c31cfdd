use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::document::Adventure;
use crate::error::CoreResult;

/// Key the editor writes and the player reads once on load.
pub const STORAGE_KEY: &str = "adventureData";

/// A string key/value store.
pub trait Storage {
    /// Read a value, `None` when the key is absent.
    fn get(&self, key: &str) -> CoreResult<Option<String>>;
    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> CoreResult<()>;
    /// Delete a value. Absent keys are not an error.
    fn remove(&mut self, key: &str) -> CoreResult<()>;
}

/// Process-local storage, gone when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> CoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage backed by one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    /// Storage rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory holding the entries.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

impl Storage for DirStorage {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> CoreResult<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CoreResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write a document under [`STORAGE_KEY`].
pub fn store_adventure<S: Storage + ?Sized>(
    storage: &mut S,
    adventure: &Adventure,
) -> CoreResult<()> {
    storage.set(STORAGE_KEY, &adventure.to_json()?)?;
    debug!("stored {} scene(s) under {STORAGE_KEY}", adventure.len());
    Ok(())
}

/// Read the document stored under [`STORAGE_KEY`], if any.
pub fn load_stored_adventure<S: Storage + ?Sized>(storage: &S) -> CoreResult<Option<Adventure>> {
    let Some(json) = storage.get(STORAGE_KEY)? else {
        return Ok(None);
    };
    match Adventure::from_json(&json) {
        Ok(adventure) => Ok(Some(adventure)),
        Err(e) => {
            warn!("failed to parse stored adventure: {e}");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Scene;
    use crate::error::CoreError;

    fn sample() -> Adventure {
        Adventure::new().with_scene("start", Scene::new("Hi").with_choice("Go", "forest"))
    }

    #[test]
    fn memory_round_trip() {
        let mut storage = MemoryStorage::new();
        assert!(load_stored_adventure(&storage).unwrap().is_none());
        store_adventure(&mut storage, &sample()).unwrap();
        assert_eq!(load_stored_adventure(&storage).unwrap(), Some(sample()));
        storage.remove(STORAGE_KEY).unwrap();
        assert!(storage.get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn dir_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut storage = DirStorage::new(dir.path().join("store"));
        assert!(load_stored_adventure(&storage).unwrap().is_none());

        store_adventure(&mut storage, &sample()).unwrap();
        assert!(storage.root().join("adventureData.json").exists());
        assert_eq!(load_stored_adventure(&storage).unwrap(), Some(sample()));

        storage.remove(STORAGE_KEY).unwrap();
        storage.remove(STORAGE_KEY).unwrap();
        assert!(load_stored_adventure(&storage).unwrap().is_none());
    }

    #[test]
    fn dir_keys_are_sanitized() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut storage = DirStorage::new(dir.path());
        storage.set("../escape", "x").unwrap();
        assert!(dir.path().join("___escape.json").exists());
    }

    #[test]
    fn corrupt_entry_is_decode_error() {
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, "[1, 2").unwrap();
        assert!(matches!(
            load_stored_adventure(&storage),
            Err(CoreError::Decode(_))
        ));
    }
}
