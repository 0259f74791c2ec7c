use actix_cors::Cors;
use actix_files::Files;
use actix_web::web::Data;
use actix_web::{App, HttpServer, middleware};
use std::sync::Arc;
use tracing::{error, info};

use mmarec::args::{self, CorsOrigin};
use mmarec::controller::upstream::{FighterApi, Roster, SportsDataClient};
use mmarec::storage::{FavoritesStore, open_store};
use mmarec::{configure, logging};

fn cors(origins: &[CorsOrigin]) -> Cors {
    let origins = origins.to_vec();
    Cors::default()
        .allowed_origin_fn(move |origin, _req| {
            origin
                .to_str()
                .is_ok_and(|origin| origins.iter().any(|allowed| allowed.matches(origin)))
        })
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init();

    let args = match args::args_checks() {
        Ok(args) => args,
        Err(e) => {
            error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let store: Arc<dyn FavoritesStore> = match open_store(&args) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open {:?} favorites store '{}': {e}", args.store, args.db_name);
            std::process::exit(1);
        }
    };
    let api: Arc<dyn FighterApi> = Arc::new(SportsDataClient::from_args(&args)?);
    let roster = Data::new(Roster::new(args.roster_max_age));

    let address = (args.bind.clone(), args.port);
    info!("Server running on http://{}:{}", address.0, address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors(&args.cors_origins))
            .app_data(Data::from(Arc::clone(&api)))
            .app_data(Data::from(Arc::clone(&store)))
            .app_data(roster.clone())
            .app_data(Data::new(args.clone()))
            .configure(configure)
            .service(Files::new("/static", args.static_dir.clone()))
    })
    .bind(address)?
    .run()
    .await?;
    Ok(())
}
