use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use super::FighterApi;
use crate::directory::reconcile;
use crate::error::CoreError;
use crate::model::{FighterView, RawFighter};

/// The reconciled fighter list and when it was fetched.
#[derive(Clone, Debug)]
pub struct RosterSnapshot {
    pub fighters: Arc<Vec<FighterView>>,
    pub fetched_at: DateTime<Utc>,
}

impl RosterSnapshot {
    fn age(&self) -> chrono::Duration {
        Utc::now() - self.fetched_at
    }

    /// `"1m, 5s"` since the fetch.
    #[must_use]
    pub fn age_string(&self) -> String {
        let secs = self.age().num_seconds().max(0);
        format!("{}m, {}s", secs / 60, secs % 60)
    }

    fn is_fresh(&self, max_age: Duration) -> bool {
        match self.age().to_std() {
            Ok(age) => age < max_age,
            // clock went backwards
            Err(_) => true,
        }
    }

    #[must_use]
    pub fn find(&self, fighter_id: i64) -> Option<&FighterView> {
        self.fighters
            .iter()
            .find(|f| f.fighter.fighter_id == fighter_id)
    }
}

/// The server's copy of the fighter list, refetched once it is older than
/// `max_age`. Failed fetches are never stored.
///
/// Only one request fetches at a time. While it does, other requests get the
/// stale list if there is one and wait only when there is none.
pub struct Roster {
    max_age: Duration,
    slot: RwLock<Option<RosterSnapshot>>,
    refresh: Mutex<()>,
}

impl Roster {
    #[must_use]
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            slot: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if the roster is stale and the upstream fetch or its
    /// decoding fails
    pub async fn get_or_load(&self, api: &dyn FighterApi) -> Result<RosterSnapshot, CoreError> {
        let current = self.slot.read().await.clone();
        if let Some(snapshot) = self.fresh(&current) {
            return Ok(snapshot);
        }

        let _refreshing = match (self.refresh.try_lock(), current) {
            (Ok(guard), _) => guard,
            (Err(_), Some(stale)) => return Ok(stale),
            (Err(_), None) => self.refresh.lock().await,
        };
        // another request may have refreshed it while we waited
        if let Some(snapshot) = self.fresh(&*self.slot.read().await) {
            return Ok(snapshot);
        }

        let value = api.fighters().await?;
        let raw: Vec<RawFighter> = serde_json::from_value(value)?;
        let received = raw.len();
        let fighters = reconcile(raw);
        info!("Roster refreshed: {} fighters from {received} upstream rows", fighters.len());

        let snapshot = RosterSnapshot {
            fighters: Arc::new(fighters),
            fetched_at: Utc::now(),
        };
        *self.slot.write().await = Some(snapshot.clone());
        Ok(snapshot)
    }

    fn fresh(&self, slot: &Option<RosterSnapshot>) -> Option<RosterSnapshot> {
        slot.as_ref()
            .filter(|snapshot| snapshot.is_fresh(self.max_age))
            .cloned()
    }
}
