// Route exports
pub mod matches;
pub mod quiz;

use actix_web::{http::StatusCode, web, HttpResponse};
use std::sync::Arc;

use crate::config::RankingSettings;
use crate::core::{QuizError, RankingEngine};
use crate::models::ErrorResponse;
use crate::services::{CacheError, CatalogCache, ListingClient, SessionStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub listing: Arc<ListingClient>,
    pub catalog: Arc<CatalogCache>,
    pub sessions: Arc<SessionStore>,
    pub engine: RankingEngine,
    pub ranking: RankingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(quiz::configure),
    );
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

pub(crate) fn quiz_error_response(err: &QuizError) -> HttpResponse {
    let (status, error) = match err {
        QuizError::InvalidCriterion(_) => (StatusCode::BAD_REQUEST, "Invalid criterion"),
        QuizError::InvalidOption { .. } => (StatusCode::BAD_REQUEST, "Invalid option"),
        QuizError::IncompleteQuiz { .. } => (StatusCode::CONFLICT, "Quiz incomplete"),
        QuizError::QuizComplete => (StatusCode::CONFLICT, "Quiz complete"),
    };
    error_response(status, error, err.to_string())
}

pub(crate) fn catalog_error_response(err: &CacheError) -> HttpResponse {
    tracing::error!("Failed to load catalog: {}", err);
    error_response(StatusCode::BAD_GATEWAY, "Failed to fetch catalog", err.to_string())
}

pub(crate) fn validation_error_response(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())
}
