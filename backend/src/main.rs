use actix_cors::Cors;
use actix_web::{App, HttpServer, web};

use scan_backend::additives::AdditiveTable;
use scan_backend::config::Config;
use scan_backend::upstream::OpenFoodFactsClient;
use scan_backend::{AppState, health, index, scan};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(std::io::Error::other)?;

    let additives = AdditiveTable::load(&config.additives_path);
    let source = OpenFoodFactsClient::new(&config).map_err(std::io::Error::other)?;

    let state = web::Data::new(AppState {
        additives,
        source: Box::new(source),
    });

    log::info!(
        "Starting Scan API server on {}:{} (upstream {})",
        config.host,
        config.port,
        config.off_base_url
    );

    HttpServer::new(move || {
        let cors = Cors::permissive(); // Configure this properly for production

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(actix_web::middleware::Logger::default())
            .service(index)
            .service(health)
            .service(scan)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
