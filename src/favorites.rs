use serde::Serialize;

use crate::model::FavoritesDoc;
use crate::storage::{FavoritesStore, StorageError};

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    #[must_use]
    pub fn is_favorited(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// The favorites a page is rendered with, mirrored from the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FavoritesState {
    doc: FavoritesDoc,
}

impl FavoritesState {
    /// # Errors
    ///
    /// Will return `Err` if the store cannot be read
    pub async fn load(store: &dyn FavoritesStore, user_id: &str) -> Result<Self, StorageError> {
        let fighter_ids = store.favorites(user_id).await?;
        Ok(Self {
            doc: FavoritesDoc {
                user_id: user_id.to_string(),
                fighter_ids,
            },
        })
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.doc.user_id
    }

    #[must_use]
    pub fn contains(&self, fighter_id: &str) -> bool {
        self.doc.contains(fighter_id)
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.doc.fighter_ids
    }

    /// Flip `fighter_id` in the store first, then in memory. The in-memory
    /// copy is left alone when the store write fails.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the store write fails
    pub async fn toggle(
        &mut self,
        store: &dyn FavoritesStore,
        fighter_id: &str,
    ) -> Result<ToggleOutcome, StorageError> {
        if self.doc.contains(fighter_id) {
            store.remove_favorite(&self.doc.user_id, fighter_id).await?;
            self.doc.remove(fighter_id);
            Ok(ToggleOutcome::Removed)
        } else {
            store.add_favorite(&self.doc.user_id, fighter_id).await?;
            self.doc.insert(fighter_id);
            Ok(ToggleOutcome::Added)
        }
    }
}

/// Load the user's favorites and flip one id.
///
/// # Errors
///
/// Will return `Err` if the store cannot be read or written
pub async fn toggle_favorite(
    store: &dyn FavoritesStore,
    user_id: &str,
    fighter_id: &str,
) -> Result<(ToggleOutcome, FavoritesState), StorageError> {
    let mut state = FavoritesState::load(store, user_id).await?;
    let outcome = state.toggle(store, fighter_id).await?;
    Ok((outcome, state))
}
