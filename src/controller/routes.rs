use actix_web::{HttpResponse, web};

use crate::controller::directory::{directory, profile};
use crate::controller::favorites::{add_favorite, get_favorites, remove_favorite, toggle};
use crate::controller::fighters::{get_fighter, list_fighters};

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

/// Proxy and favorites routes. Mounted at the root and again under `/api`.
fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/fighters", web::get().to(list_fighters))
        .route("/fighters/{id}", web::get().to(get_fighter))
        .route("/favorites/{user_id}", web::get().to(get_favorites))
        .route("/favorites/{user_id}", web::post().to(add_favorite))
        .route("/favorites/{user_id}", web::delete().to(remove_favorite))
        .route("/favorites/{user_id}/toggle", web::post().to(toggle));
}

/// Every route the server answers, except `/static`.
///
/// Handlers expect `Data<dyn FighterApi>`, `Data<dyn FavoritesStore>`,
/// `Data<Roster>` and `Data<CleanArgs>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(directory))
        .route("/directory", web::get().to(directory))
        .route("/fighter/{id}", web::get().to(profile))
        .route("/health", web::get().to(health))
        .service(web::scope("/api").configure(api_routes))
        .configure(api_routes);
}
