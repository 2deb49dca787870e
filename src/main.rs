use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vehicle_match::config::Settings;
use vehicle_match::core::{Questionnaire, RankingEngine};
use vehicle_match::models::ErrorResponse;
use vehicle_match::routes::{self, AppState};
use vehicle_match::services::{CatalogCache, ListingClient, SessionStore};

/// Handle JSON payload errors
fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let response = HttpResponse::build(StatusCode::BAD_REQUEST).json(ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    });
    error::InternalError::from_response(err, response).into()
}

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Configuration comes first so logging can honour it
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);
    info!("Starting vehicle match service...");

    if let Err(errors) = settings.validate() {
        for e in &errors {
            error!("Invalid configuration: {}", e);
        }
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, errors.join("; ")));
    }

    info!("Configuration loaded successfully");

    let questionnaire = Questionnaire::new(vehicle_match::core::default_criteria()).map_err(|e| {
        error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;
    let questionnaire = Arc::new(questionnaire);

    // Initialize listing client
    let listing = ListingClient::new(
        settings.listing.endpoint.clone(),
        settings.listing.vehicles_path.clone(),
        settings.listing.api_key.clone(),
        Duration::from_secs(settings.listing.timeout_secs),
    )
    .map_err(|e| {
        error!("Failed to create listing client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Listing client initialized for {}", settings.listing.endpoint);

    let catalog = Arc::new(CatalogCache::new(settings.cache.catalog_ttl_secs));
    let sessions = Arc::new(SessionStore::new(
        Arc::clone(&questionnaire),
        settings.cache.max_sessions,
        settings.cache.session_idle_secs,
    ));

    info!(
        "Caches initialized (catalog TTL: {}s, session idle: {}s, max sessions: {})",
        settings.cache.catalog_ttl_secs, settings.cache.session_idle_secs, settings.cache.max_sessions
    );

    // Initialize ranking engine with configured weights
    let weights = settings.scoring.to_weights();
    let engine = RankingEngine::new(Arc::clone(&questionnaire), weights);

    info!("Ranking engine initialized with weights: {:?}", weights);

    let app_state = AppState {
        listing: Arc::new(listing),
        catalog,
        sessions,
        engine,
        ranking: settings.ranking.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
