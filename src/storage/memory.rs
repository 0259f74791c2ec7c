use ahash::RandomState;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{FavoritesStore, StorageError};
use crate::model::FavoritesDoc;

/// Favorites held in process memory. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryFavoritesStore {
    docs: RwLock<HashMap<String, FavoritesDoc, RandomState>>,
}

impl MemoryFavoritesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoritesStore for MemoryFavoritesStore {
    async fn favorites(&self, user_id: &str) -> Result<Vec<String>, StorageError> {
        let docs = self.docs.read().await;
        Ok(docs
            .get(user_id)
            .map(|doc| doc.fighter_ids.clone())
            .unwrap_or_default())
    }

    async fn add_favorite(&self, user_id: &str, fighter_id: &str) -> Result<(), StorageError> {
        let mut docs = self.docs.write().await;
        docs.entry(user_id.to_string())
            .or_insert_with(|| FavoritesDoc::new(user_id))
            .insert(fighter_id);
        Ok(())
    }

    async fn remove_favorite(
        &self,
        user_id: &str,
        fighter_id: &str,
    ) -> Result<(), StorageError> {
        let mut docs = self.docs.write().await;
        if let Some(doc) = docs.get_mut(user_id) {
            doc.remove(fighter_id);
        }
        Ok(())
    }
}
