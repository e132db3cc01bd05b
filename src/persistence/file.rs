//! Directory backend for native builds
//!
//! Each key is stored as `<dir>/<key>.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, PersistenceError};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a data directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are short identifiers; anything outside [A-Za-z0-9_-] becomes '_'
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        match fs::remove_file(self.path_for(key)) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let name = format!("budget-jigsaw-{name}-{}", std::process::id());
        std::env::temp_dir().join(name)
    }

    #[test]
    fn test_file_store_roundtrip_and_remove() {
        let dir = temp_dir("roundtrip");
        let store = FileStore::open(&dir).unwrap();

        let key = "puzzleHighScores";
        assert_eq!(store.get(key).unwrap(), None);
        store.set(key, "[]").unwrap();
        assert_eq!(store.get(key).unwrap().as_deref(), Some("[]"));

        store.remove(key).unwrap();
        store.remove(key).unwrap();
        assert_eq!(store.get(key).unwrap(), None);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_keys_are_sanitized() {
        let store = FileStore::open(temp_dir("sanitize")).unwrap();
        let path = store.path_for("../escape/me");
        assert_eq!(path.file_name().unwrap(), "___escape_me.json");
        let _ = fs::remove_dir_all(store.dir());
    }
}
