use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

use crate::args::CleanArgs;
use crate::controller::upstream::{FighterApi, Roster, RosterSnapshot};
use crate::directory::images::{default_image_file_name, image_file_name};
use crate::directory::pagination::parse_page_input;
use crate::directory::{Gender, PageMarker, SortKey, ViewState, page_markers, total_pages};
use crate::favorites::FavoritesState;
use crate::model::FighterView;
use crate::storage::FavoritesStore;
use crate::view::directory::render_directory_page;
use crate::view::profile::{render_fighter_not_found, render_profile_page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRequest {
    pub state: ViewState,
    pub user_id: Option<String>,
    /// Raw jump-to-page input, validated once the page count is known.
    pub goto: Option<String>,
    pub want_json: bool,
}

fn list_param(query: &HashMap<String, String>, key: &str) -> Vec<String> {
    query
        .get(key)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn flag_param(query: &HashMap<String, String>, key: &str) -> bool {
    match query.get(key).map(String::as_str) {
        Some("1") => true,
        Some("0") | None => false,
        Some(other) => other.parse().unwrap_or(false),
    }
}

#[allow(clippy::implicit_hasher)]
#[must_use]
pub fn parse_directory_request(query: &HashMap<String, String>) -> DirectoryRequest {
    let mut state = ViewState {
        search_term: query.get("q").map(|q| q.trim().to_string()).unwrap_or_default(),
        weight_classes: list_param(query, "weight").into_iter().collect(),
        genders: list_param(query, "gender")
            .iter()
            .filter_map(|g| g.parse::<Gender>().ok())
            .collect(),
        sort: query.get("sort").and_then(|s| s.parse::<SortKey>().ok()),
        page: query
            .get("page")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1),
    };
    let goto = query
        .get("goto")
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty());
    if flag_param(query, "search") {
        let term = state.search_term.clone();
        state.search(&term);
    }
    DirectoryRequest {
        state,
        user_id: query
            .get("user")
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty()),
        goto,
        want_json: flag_param(query, "json"),
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FighterCard {
    #[serde(flatten)]
    pub view: FighterView,
    pub image: String,
    pub default_image: &'static str,
    pub favorited: bool,
}

impl FighterCard {
    #[must_use]
    pub fn new(view: &FighterView, favorites: &[String]) -> Self {
        let id = view.fighter.fighter_id.to_string();
        Self {
            image: image_file_name(view),
            default_image: default_image_file_name(view),
            favorited: favorites.contains(&id),
            view: view.clone(),
        }
    }
}

/// Everything the directory page shows, in the form the `json=1` rendition returns.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryPage {
    pub state: ViewState,
    pub user_id: Option<String>,
    pub fighters: Vec<FighterCard>,
    pub total_results: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub page_markers: Vec<PageMarker>,
    /// Facet options: every weight class present in the roster.
    pub weight_classes: Vec<String>,
    pub favorites: Vec<String>,
    pub error: Option<String>,
    pub last_refresh: Option<String>,
}

/// Run search, facets, sort and pagination over the roster.
///
/// A `page` outside the result range falls back to page 1. A bad `goto`
/// leaves the page alone and is reported in `error`.
#[must_use]
pub fn build_directory_page(
    request: DirectoryRequest,
    fighters: &[FighterView],
    favorites: &[String],
    page_size: usize,
) -> DirectoryPage {
    let DirectoryRequest {
        mut state,
        user_id,
        goto,
        ..
    } = request;

    let results = state.apply(fighters, favorites);
    let pages = total_pages(results.len(), page_size);
    if state.go_to_page(state.page, pages).is_err() {
        state.page = 1;
    }

    let mut error = None;
    if let Some(input) = goto {
        match parse_page_input(&input, pages).and_then(|p| state.go_to_page(p, pages)) {
            Ok(()) => {}
            Err(e) => error = Some(e.to_string()),
        }
    }

    let weight_classes: BTreeSet<&str> = fighters
        .iter()
        .map(|f| f.fighter.weight_class.as_str())
        .collect();

    let (current, _) = state.paginate(&results, page_size);
    DirectoryPage {
        fighters: current
            .iter()
            .map(|view| FighterCard::new(view, favorites))
            .collect(),
        total_results: results.len(),
        total_pages: pages,
        page_size,
        page_markers: page_markers(state.page, pages),
        weight_classes: weight_classes.into_iter().map(ToString::to_string).collect(),
        favorites: favorites.to_vec(),
        error,
        last_refresh: None,
        state,
        user_id,
    }
}

async fn load_roster(roster: &Roster, api: &dyn FighterApi) -> Option<RosterSnapshot> {
    match roster.get_or_load(api).await {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("Failed to load fighters: {e}");
            None
        }
    }
}

async fn load_favorites(store: &dyn FavoritesStore, user_id: Option<&str>) -> FavoritesState {
    let Some(user_id) = user_id else {
        return FavoritesState::default();
    };
    match FavoritesState::load(store, user_id).await {
        Ok(state) => state,
        Err(e) => {
            warn!("Failed to load favorites for {user_id}: {e}");
            FavoritesState::default()
        }
    }
}

/// `GET /` and `GET /directory`.
pub async fn directory(
    query: web::Query<HashMap<String, String>>,
    api: Data<dyn FighterApi>,
    store: Data<dyn FavoritesStore>,
    roster: Data<Roster>,
    args: Data<CleanArgs>,
) -> impl Responder {
    let request = parse_directory_request(&query);
    let want_json = request.want_json;

    let snapshot = load_roster(&roster, api.get_ref()).await;
    let favorites = load_favorites(store.get_ref(), request.user_id.as_deref()).await;
    let fighters: &[FighterView] = snapshot
        .as_ref()
        .map(|s| s.fighters.as_slice())
        .unwrap_or_default();

    let mut page = build_directory_page(request, fighters, favorites.ids(), args.page_size);
    page.last_refresh = snapshot.as_ref().map(RosterSnapshot::age_string);

    if want_json {
        HttpResponse::Ok().json(page)
    } else {
        HttpResponse::Ok()
            .content_type("text/html")
            .body(render_directory_page(&page).into_string())
    }
}

/// `GET /fighter/{id}`: the profile page.
pub async fn profile(
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    api: Data<dyn FighterApi>,
    store: Data<dyn FavoritesStore>,
    roster: Data<Roster>,
) -> impl Responder {
    let Ok(fighter_id) = path.trim().parse::<i64>() else {
        return HttpResponse::NotFound()
            .content_type("text/html")
            .body(render_fighter_not_found(&path).into_string());
    };
    let Some(snapshot) = load_roster(&roster, api.get_ref()).await else {
        return HttpResponse::BadGateway().json(json!({"error": "fighter data is unavailable"}));
    };
    let Some(view) = snapshot.find(fighter_id) else {
        return HttpResponse::NotFound()
            .content_type("text/html")
            .body(render_fighter_not_found(&path).into_string());
    };

    let user_id = query
        .get("user")
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());
    let favorites = load_favorites(store.get_ref(), user_id.as_deref()).await;
    let card = FighterCard::new(view, favorites.ids());
    let today = Utc::now().date_naive();
    HttpResponse::Ok()
        .content_type("text/html")
        .body(render_profile_page(&card, user_id.as_deref(), today).into_string())
}
