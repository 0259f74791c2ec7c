use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::args::{CleanArgs, StoreKind};

pub mod json_file;
pub mod memory;
pub mod sqlite;

pub use json_file::JsonFileFavoritesStore;
pub use memory::MemoryFavoritesStore;
pub use sqlite::SqliteFavoritesStore;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StorageError {
    message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Persistence for each user's set of favorite fighter ids.
///
/// Adding an id that is already present and removing one that is absent both
/// succeed without changing anything. A user with no document reads as an
/// empty list.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn favorites(&self, user_id: &str) -> Result<Vec<String>, StorageError>;
    async fn add_favorite(&self, user_id: &str, fighter_id: &str) -> Result<(), StorageError>;
    async fn remove_favorite(&self, user_id: &str, fighter_id: &str)
    -> Result<(), StorageError>;
}

/// Open the backend selected on the command line.
///
/// # Errors
///
/// Will return `Err` if the sqlite database cannot be opened or its schema created
pub fn open_store(args: &CleanArgs) -> Result<Arc<dyn FavoritesStore>, StorageError> {
    let store: Arc<dyn FavoritesStore> = match args.store {
        StoreKind::Sqlite => Arc::new(SqliteFavoritesStore::open(&args.db_name)?),
        StoreKind::Memory => Arc::new(MemoryFavoritesStore::new()),
        StoreKind::JsonFile => Arc::new(JsonFileFavoritesStore::new(&args.db_name)),
    };
    Ok(store)
}
