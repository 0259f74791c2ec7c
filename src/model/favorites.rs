use serde::{Deserialize, Serialize};

/// One user's favorites document: `{userId, fighterIds}`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesDoc {
    pub user_id: String,
    pub fighter_ids: Vec<String>,
}

impl FavoritesDoc {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            fighter_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn contains(&self, fighter_id: &str) -> bool {
        self.fighter_ids.iter().any(|id| id == fighter_id)
    }

    /// Set union with one id. Returns `false` when the id was already present.
    pub fn insert(&mut self, fighter_id: &str) -> bool {
        if self.contains(fighter_id) {
            return false;
        }
        self.fighter_ids.push(fighter_id.to_string());
        true
    }

    /// Set difference with one id. Returns `false` when the id was absent.
    pub fn remove(&mut self, fighter_id: &str) -> bool {
        let before = self.fighter_ids.len();
        self.fighter_ids.retain(|id| id != fighter_id);
        before != self.fighter_ids.len()
    }
}

/// Fighter ids arrive as json numbers from some clients and strings from others.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum FighterIdInput {
    Text(String),
    Number(i64),
}

impl FighterIdInput {
    /// The id as stored, or `None` when it is blank.
    #[must_use]
    pub fn into_id(self) -> Option<String> {
        let id = match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Number(n) => n.to_string(),
        };
        (!id.is_empty()).then_some(id)
    }
}

/// Body of the favorites POST/DELETE/toggle routes.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteBody {
    pub fighter_id: Option<FighterIdInput>,
}
