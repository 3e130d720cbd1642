use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};

use crate::error::StorageError;

/// String values under string keys, the shape of a device's local storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing a key that was never set is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// One file per key below a data directory.
#[derive(Clone)]
pub struct FileStore {
    root: Arc<PathBuf>,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_structure(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.root()).await?;
        Ok(())
    }

    pub fn item_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root().join(format!("{file_name}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.item_path(key);
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path).await?))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_structure().await?;
        let path = self.item_path(key);
        // Write beside the target and rename so readers never see half a value.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value).await?;
        fs::rename(&staging, &path).await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.item_path(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_maps_to_a_plain_file_name() {
        let store = FileStore::new(PathBuf::from("data"));
        assert_eq!(
            store.item_path("@tripr_trips"),
            PathBuf::from("data").join("_tripr_trips.json")
        );
    }

    #[tokio::test]
    async fn file_store_round_trips_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get_item("@tripr_trips").await.unwrap(), None);
        store.set_item("@tripr_trips", "[]").await.unwrap();
        store.set_item("@tripr_trips", "[1]").await.unwrap();
        assert_eq!(
            store.get_item("@tripr_trips").await.unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[tokio::test]
    async fn memory_store_keeps_keys_apart() {
        let store = MemoryStore::new();
        store.set_item("a", "1").await.unwrap();
        assert_eq!(store.get_item("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.get_item("b").await.unwrap(), None);

        store.remove_item("a").await.unwrap();
        store.remove_item("a").await.unwrap();
        assert_eq!(store.get_item("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_removes_items() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        store.remove_item("@tripr_trips").await.unwrap();
        store.set_item("@tripr_trips", "[]").await.unwrap();
        store.remove_item("@tripr_trips").await.unwrap();

        assert_eq!(store.get_item("@tripr_trips").await.unwrap(), None);
        assert!(!store.item_path("@tripr_trips").exists());
    }
}
