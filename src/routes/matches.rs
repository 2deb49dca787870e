use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{HealthResponse, RankRequest, RankResponse};
use crate::routes::{catalog_error_response, validation_error_response, AppState};

/// Configure health, ranking and catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/rank", web::post().to(rank))
        .route("/catalog/refresh", web::post().to(refresh_catalog));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        active_sessions: state.sessions.active_sessions(),
    })
}

/// Stateless ranking endpoint
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "profile": { "budget": "400000-800000", "features": ["ABS"] },
///   "vehicles": [ { "id": "car-1", "price": 600000 } ],
///   "minMatchPercentage": 40,
///   "topN": 5
/// }
/// ```
/// `vehicles` is optional; the cached catalog is ranked when it is absent.
async fn rank(state: web::Data<AppState>, req: web::Json<RankRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    let req = req.into_inner();
    let options = state.ranking.options(req.min_match_percentage, req.top_n);

    let ranking = match &req.vehicles {
        Some(vehicles) => state.engine.rank(&req.profile, vehicles, &options),
        None => match state.catalog.catalog(&state.listing).await {
            Ok(catalog) => state.engine.rank(&req.profile, &catalog, &options),
            Err(e) => return catalog_error_response(&e),
        },
    };

    tracing::info!(
        "Ranked {} candidates for {} answers, returning {}",
        ranking.total_candidates,
        req.profile.len(),
        ranking.matches.len()
    );

    HttpResponse::Ok().json(RankResponse {
        profile: req.profile,
        ranking,
    })
}

/// Drop the cached catalog snapshot
///
/// POST /api/v1/catalog/refresh
async fn refresh_catalog(state: web::Data<AppState>) -> impl Responder {
    state.catalog.invalidate().await;
    HttpResponse::Ok().json(serde_json::json!({
        "refreshed": true,
        "cache": state.catalog.stats(),
    }))
}
