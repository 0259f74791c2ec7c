use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::{FavoritesStore, StorageError};
use crate::model::FavoritesDoc;

/// Favorites kept as a json array of `{userId, fighterIds}` documents in one
/// file. The whole file is rewritten on every change.
pub struct JsonFileFavoritesStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileFavoritesStore {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<FavoritesDoc>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::new(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            StorageError::new(format!("failed to parse {}: {e}", self.path.display()))
        })
    }

    async fn save(&self, docs: &[FavoritesDoc]) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(docs).map_err(|e| StorageError::new(e.to_string()))?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| StorageError::new(format!("failed to write {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            StorageError::new(format!("failed to replace {}: {e}", self.path.display()))
        })
    }
}

#[async_trait]
impl FavoritesStore for JsonFileFavoritesStore {
    async fn favorites(&self, user_id: &str) -> Result<Vec<String>, StorageError> {
        let _guard = self.lock.lock().await;
        let docs = self.load().await?;
        Ok(docs
            .into_iter()
            .find(|doc| doc.user_id == user_id)
            .map(|doc| doc.fighter_ids)
            .unwrap_or_default())
    }

    async fn add_favorite(&self, user_id: &str, fighter_id: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut docs = self.load().await?;
        match docs.iter_mut().find(|doc| doc.user_id == user_id) {
            Some(doc) => {
                if !doc.insert(fighter_id) {
                    return Ok(());
                }
            }
            None => {
                let mut doc = FavoritesDoc::new(user_id);
                doc.insert(fighter_id);
                docs.push(doc);
            }
        }
        self.save(&docs).await
    }

    async fn remove_favorite(
        &self,
        user_id: &str,
        fighter_id: &str,
    ) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut docs = self.load().await?;
        let changed = docs
            .iter_mut()
            .find(|doc| doc.user_id == user_id)
            .is_some_and(|doc| doc.remove(fighter_id));
        if changed {
            self.save(&docs).await?;
        }
        Ok(())
    }
}
