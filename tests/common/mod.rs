#![allow(dead_code)]

use actix_web::web::{self, Data};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use mmarec::args::{CleanArgs, CorsOrigin, StoreKind};
use mmarec::controller::upstream::{FighterApi, Roster, UpstreamError};
use mmarec::storage::{FavoritesStore, MemoryFavoritesStore};

pub const FIXTURE: &str = include_str!("../fighters_basic.json");

pub fn fixture_fighters() -> Value {
    serde_json::from_str(FIXTURE).expect("fixture is valid json")
}

/// Stands in for the sports-data api.
pub struct StubFighterApi {
    pub listing: Result<Value, UpstreamError>,
    pub calls: AtomicUsize,
}

impl StubFighterApi {
    pub fn with_fixture() -> Self {
        Self::new(Ok(fixture_fighters()))
    }

    pub fn failing(err: UpstreamError) -> Self {
        Self::new(Err(err))
    }

    pub fn new(listing: Result<Value, UpstreamError>) -> Self {
        Self {
            listing,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FighterApi for StubFighterApi {
    async fn fighters(&self) -> Result<Value, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.listing.clone()
    }

    async fn fighter(&self, fighter_id: &str) -> Result<Value, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let listing = self.listing.clone()?;
        listing
            .as_array()
            .and_then(|rows| {
                rows.iter()
                    .find(|row| row["FighterId"].to_string() == fighter_id)
                    .cloned()
            })
            .ok_or_else(|| UpstreamError::Status {
                status: 404,
                status_text: "Not Found".to_string(),
                body: r#"{"HttpStatusCode":404,"Code":404,"Description":"Not Found"}"#.to_string(),
            })
    }
}

pub fn test_args(page_size: usize) -> CleanArgs {
    CleanArgs {
        bind: "127.0.0.1".to_string(),
        port: 0,
        api_key: "test-key".to_string(),
        upstream_base_url: "http://127.0.0.1:9".to_string(),
        upstream_timeout: Some(Duration::from_secs(2)),
        forward_upstream_errors: false,
        store: StoreKind::Memory,
        db_name: String::new(),
        cors_origins: vec![CorsOrigin::Exact("http://localhost:5173".to_string())],
        page_size,
        roster_max_age: Duration::from_secs(300),
        static_dir: PathBuf::from("./static"),
    }
}

/// Everything the handlers pull out of app data.
pub struct TestState {
    pub api: Arc<StubFighterApi>,
    pub store: Arc<dyn FavoritesStore>,
    pub roster: Data<Roster>,
    pub args: CleanArgs,
}

impl TestState {
    pub fn new(api: StubFighterApi, page_size: usize) -> Self {
        let args = test_args(page_size);
        Self {
            api: Arc::new(api),
            store: Arc::new(MemoryFavoritesStore::new()),
            roster: Data::new(Roster::new(args.roster_max_age)),
            args,
        }
    }

    pub fn forwarding_errors(mut self) -> Self {
        self.args.forward_upstream_errors = true;
        self
    }

    /// App data plus every route, for `App::new().configure(...)`.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        let api: Arc<dyn FighterApi> = self.api.clone();
        cfg.app_data(Data::from(api))
            .app_data(Data::from(Arc::clone(&self.store)))
            .app_data(self.roster.clone())
            .app_data(Data::new(self.args.clone()));
        mmarec::configure(cfg);
    }
}
