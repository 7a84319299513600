use actix_web::{web, App, HttpServer};
use backend::config::AppConfig;
use backend::db::connect_db;
use backend::middleware::cors::cors_middleware;
use backend::routes;
use backend::state::app_state::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let db = match connect_db(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate_up(&db).await {
        eprintln!("❌ Failed to run migrations: {e}");
        std::process::exit(1);
    }

    tracing::info!("starting server on http://{}:{}", config.host, config.port);

    let data = web::Data::new(AppState::new(db, config.security.clone()));

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
