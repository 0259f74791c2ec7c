use actix_web::web::{self, Data};
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;
use tracing::error;

use crate::favorites::toggle_favorite;
use crate::model::FavoriteBody;
use crate::storage::FavoritesStore;
use crate::view::directory::render_favorite_star;

fn require_fighter_id(body: FavoriteBody) -> Result<String, HttpResponse> {
    body.fighter_id
        .and_then(|id| id.into_id())
        .ok_or_else(|| HttpResponse::BadRequest().json(json!({"error": "fighterId is required"})))
}

fn server_error(route: &str, user_id: &str, e: &dyn std::error::Error) -> HttpResponse {
    error!("{route} /favorites/{user_id}: {e}");
    HttpResponse::InternalServerError().body("Server error")
}

/// `GET /favorites/{userId}`: the user's ids, `[]` when there are none.
pub async fn get_favorites(
    path: web::Path<String>,
    store: Data<dyn FavoritesStore>,
) -> HttpResponse {
    let user_id = path.into_inner();
    match store.favorites(&user_id).await {
        Ok(ids) => HttpResponse::Ok().json(ids),
        Err(e) => server_error("GET", &user_id, &e),
    }
}

pub async fn add_favorite(
    path: web::Path<String>,
    body: web::Json<FavoriteBody>,
    store: Data<dyn FavoritesStore>,
) -> HttpResponse {
    let user_id = path.into_inner();
    let fighter_id = match require_fighter_id(body.into_inner()) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match store.add_favorite(&user_id, &fighter_id).await {
        Ok(()) => HttpResponse::Ok().body("Added to favorites"),
        Err(e) => server_error("POST", &user_id, &e),
    }
}

pub async fn remove_favorite(
    path: web::Path<String>,
    body: web::Json<FavoriteBody>,
    store: Data<dyn FavoritesStore>,
) -> HttpResponse {
    let user_id = path.into_inner();
    let fighter_id = match require_fighter_id(body.into_inner()) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match store.remove_favorite(&user_id, &fighter_id).await {
        Ok(()) => HttpResponse::Ok().body("Removed from favorites"),
        Err(e) => server_error("DELETE", &user_id, &e),
    }
}

/// `POST /favorites/{userId}/toggle`. Accepts json or a form post; htmx
/// callers get the re-rendered star button back instead of json.
pub async fn toggle(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Either<web::Json<FavoriteBody>, web::Form<FavoriteBody>>,
    store: Data<dyn FavoritesStore>,
) -> HttpResponse {
    let user_id = path.into_inner();
    let body = match body {
        web::Either::Left(json) => json.into_inner(),
        web::Either::Right(form) => form.into_inner(),
    };
    let fighter_id = match require_fighter_id(body) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let (outcome, state) = match toggle_favorite(store.get_ref(), &user_id, &fighter_id).await {
        Ok(toggled) => toggled,
        Err(e) => return server_error("POST", &user_id, &e),
    };

    if req.headers().contains_key("HX-Request") {
        let markup = render_favorite_star(&user_id, &fighter_id, outcome.is_favorited());
        return HttpResponse::Ok()
            .content_type("text/html")
            .body(markup.into_string());
    }
    HttpResponse::Ok().json(json!({
        "fighterId": fighter_id,
        "favorited": outcome.is_favorited(),
        "fighterIds": state.ids(),
    }))
}
