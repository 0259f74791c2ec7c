use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::{Arc, Mutex};

use super::{FavoritesStore, StorageError};
use crate::model::FavoritesDoc;

const SCHEMA: &str = include_str!("../sql/schema/sqlite/00_favorites.sql");
const GET_FAVORITES: &str = include_str!("../sql/functions/sqlite/01_sp_get_favorites.sql");
const SET_FAVORITES: &str = include_str!("../sql/functions/sqlite/02_sp_set_favorites.sql");

fn sql_err(err: rusqlite::Error) -> StorageError {
    StorageError::new(err.to_string())
}

/// Favorites kept one row per user, the ids serialized as a json array.
#[derive(Clone)]
pub struct SqliteFavoritesStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteFavoritesStore {
    /// Open (or create) the database file and make sure the table exists.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the file cannot be opened or the schema cannot be applied
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(sql_err)?;
        Self::with_schema(conn)
    }

    /// # Errors
    ///
    /// Will return `Err` if the schema cannot be applied
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(sql_err)?;
        Self::with_schema(conn)
    }

    fn with_schema(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA).map_err(sql_err)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn interact<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| StorageError::new("sqlite connection lock poisoned"))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| StorageError::new(e.to_string()))?
    }

    /// Read the user's document, let `change` edit it, and write it back in
    /// one transaction. Nothing is written when `change` reports no change.
    async fn update<F>(&self, user_id: &str, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut FavoritesDoc, bool) -> bool + Send + 'static,
    {
        let user_id = user_id.to_string();
        self.interact(move |conn| {
            let tx = conn.transaction().map_err(sql_err)?;
            let stored = read_ids(&tx, &user_id)?;
            let exists = stored.is_some();
            let mut doc = FavoritesDoc {
                user_id,
                fighter_ids: stored.unwrap_or_default(),
            };
            if change(&mut doc, exists) {
                let encoded = serde_json::to_string(&doc.fighter_ids)
                    .map_err(|e| StorageError::new(e.to_string()))?;
                tx.execute(SET_FAVORITES, params![doc.user_id, encoded])
                    .map_err(sql_err)?;
            }
            tx.commit().map_err(sql_err)
        })
        .await
    }
}

fn read_ids(conn: &Connection, user_id: &str) -> Result<Option<Vec<String>>, StorageError> {
    let raw: Option<String> = conn
        .query_row(GET_FAVORITES, params![user_id], |row| row.get(0))
        .optional()
        .map_err(sql_err)?;
    raw.map(|text| {
        serde_json::from_str::<Vec<String>>(&text).map_err(|e| {
            StorageError::new(format!("favorites for '{user_id}' are not a json array: {e}"))
        })
    })
    .transpose()
}

#[async_trait]
impl FavoritesStore for SqliteFavoritesStore {
    async fn favorites(&self, user_id: &str) -> Result<Vec<String>, StorageError> {
        let user_id = user_id.to_string();
        self.interact(move |conn| Ok(read_ids(conn, &user_id)?.unwrap_or_default()))
            .await
    }

    async fn add_favorite(&self, user_id: &str, fighter_id: &str) -> Result<(), StorageError> {
        let fighter_id = fighter_id.to_string();
        // the first add creates the row, even when nothing else changes
        self.update(user_id, move |doc, exists| doc.insert(&fighter_id) || !exists)
            .await
    }

    async fn remove_favorite(
        &self,
        user_id: &str,
        fighter_id: &str,
    ) -> Result<(), StorageError> {
        let fighter_id = fighter_id.to_string();
        self.update(user_id, move |doc, _| doc.remove(&fighter_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn remove_never_creates_a_row() {
        let store = SqliteFavoritesStore::open_in_memory().unwrap();
        store.remove_favorite("ghost", "1").await.unwrap();
        let rows: i64 = store
            .interact(|conn| {
                conn.query_row("SELECT COUNT(*) FROM favorites", [], |row| row.get(0))
                    .map_err(sql_err)
            })
            .await
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn corrupt_row_is_reported() {
        let store = SqliteFavoritesStore::open_in_memory().unwrap();
        store
            .interact(|conn| {
                conn.execute(
                    "INSERT INTO favorites (user_id, fighter_ids) VALUES ('u', 'not json')",
                    [],
                )
                .map_err(sql_err)
            })
            .await
            .unwrap();
        let err = store.favorites("u").await.unwrap_err();
        assert!(err.to_string().contains("not a json array"));
    }
}
