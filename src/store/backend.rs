//! Key-value backends the form store persists through

use super::StoreError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// String key to string blob storage, the moral equivalent of browser local storage
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueBackend {
    /// Read the blob under `key`, `None` if nothing was ever written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the blob under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Stores each key as `<root>/<key>.json`
///
/// Writes go to a temporary sibling and are renamed into place, so a reader
/// never sees a half-written blob. Two processes sharing a root can still
/// overwrite each other's updates.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let path = self.path_for(key);
        let tmp = self.root.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })?;
        Ok(())
    }
}

/// Volatile backend, used when no data directory can be resolved
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Memory backend that refuses writes to one key
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RejectingBackend {
    pub inner: MemoryBackend,
    pub rejected_key: &'static str,
}

#[cfg(test)]
impl KeyValueBackend for RejectingBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if key == self.rejected_key {
            return Err(StoreError::Backend(format!("{key} is read-only")));
        }
        self.inner.set(key, value)
    }
}
