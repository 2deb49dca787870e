use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::core::QuizState;
use crate::models::{AnswerRequest, RankResponse, ResultsRequest, SessionResponse};
use crate::routes::{catalog_error_response, error_response, quiz_error_response, validation_error_response, AppState};
use crate::services::QuizSession;

/// Configure quiz routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/quiz/questions", web::get().to(get_questions))
        .route("/quiz/sessions", web::post().to(create_session))
        .route("/quiz/sessions/{id}", web::get().to(get_session))
        .route("/quiz/sessions/{id}", web::delete().to(delete_session))
        .route("/quiz/sessions/{id}/answer", web::post().to(answer))
        .route("/quiz/sessions/{id}/results", web::post().to(results))
        .route("/quiz/sessions/{id}/{action}", web::post().to(navigate));
}

fn session_view(session: &QuizSession) -> SessionResponse {
    let collector = &session.collector;
    let pointer = match collector.state() {
        QuizState::Active(i) => Some(i),
        QuizState::Complete => None,
    };

    SessionResponse {
        session_id: session.id.to_string(),
        complete: collector.is_complete(),
        pointer,
        total_criteria: collector.questionnaire().len(),
        current_criterion: collector.current_criterion().cloned(),
        answers: collector.answers().clone(),
        started_at: session.started_at,
    }
}

fn session_not_found(id: &Uuid) -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        "Session not found",
        format!("No quiz session {} (it may have expired)", id),
    )
}

/// List the quiz criteria in order
///
/// GET /api/v1/quiz/questions
async fn get_questions(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.engine.questionnaire().criteria())
}

/// Start a quiz session
///
/// POST /api/v1/quiz/sessions
async fn create_session(state: web::Data<AppState>) -> impl Responder {
    let session = state.sessions.create().await;
    let session = session.lock().await;
    tracing::info!("Created quiz session {}", session.id);
    HttpResponse::Created().json(session_view(&session))
}

/// GET /api/v1/quiz/sessions/{id}
async fn get_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    match state.sessions.get(&id).await {
        Some(session) => HttpResponse::Ok().json(session_view(&*session.lock().await)),
        None => session_not_found(&id),
    }
}

/// DELETE /api/v1/quiz/sessions/{id}
async fn delete_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    if state.sessions.get(&id).await.is_none() {
        return session_not_found(&id);
    }
    state.sessions.remove(&id).await;
    HttpResponse::NoContent().finish()
}

/// Record an answer
///
/// POST /api/v1/quiz/sessions/{id}/answer
///
/// Request body:
/// ```json
/// { "criterionId": "fuel", "value": "Petrol" }
/// ```
async fn answer(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<AnswerRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    let id = path.into_inner();
    let Some(session) = state.sessions.get(&id).await else {
        return session_not_found(&id);
    };

    let mut session = session.lock().await;
    match session.collector.answer(&req.criterion_id, &req.value) {
        Ok(()) => HttpResponse::Ok().json(session_view(&session)),
        Err(e) => {
            tracing::debug!("Rejected answer for session {}: {}", id, e);
            quiz_error_response(&e)
        }
    }
}

/// Move through the quiz
///
/// POST /api/v1/quiz/sessions/{id}/{action}
/// where action is one of proceed, skip, back, forward, reset
async fn navigate(state: web::Data<AppState>, path: web::Path<(Uuid, String)>) -> impl Responder {
    let (id, action) = path.into_inner();
    let Some(session) = state.sessions.get(&id).await else {
        return session_not_found(&id);
    };

    let mut session = session.lock().await;
    let collector = &mut session.collector;

    let outcome = match action.as_str() {
        "proceed" => collector.proceed(),
        "skip" => {
            collector.skip();
            Ok(())
        }
        "back" => {
            collector.go_back();
            Ok(())
        }
        "forward" => {
            collector.go_forward();
            Ok(())
        }
        "reset" => {
            collector.reset();
            tracing::info!("Reset quiz session {}", id);
            Ok(())
        }
        other => {
            return error_response(
                StatusCode::NOT_FOUND,
                "Unknown action",
                format!("'{}' is not a quiz action", other),
            );
        }
    };

    match outcome {
        Ok(()) => HttpResponse::Ok().json(session_view(&session)),
        Err(e) => quiz_error_response(&e),
    }
}

/// An empty body means every option takes its default
fn parse_results_request(body: &[u8]) -> Result<ResultsRequest, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ResultsRequest::default());
    }
    serde_json::from_slice(body)
}

/// Finish the quiz and rank the catalog
///
/// POST /api/v1/quiz/sessions/{id}/results
///
/// Request body (optional):
/// ```json
/// { "allowPartial": true, "minMatchPercentage": 40, "topN": 5 }
/// ```
async fn results(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Bytes,
) -> impl Responder {
    let req = match parse_results_request(&body) {
        Ok(req) => req,
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, "Invalid request body", e.to_string());
        }
    };
    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    let id = path.into_inner();
    let Some(session) = state.sessions.get(&id).await else {
        return session_not_found(&id);
    };

    let profile = match session.lock().await.collector.finalize(req.allow_partial) {
        Ok(profile) => profile,
        Err(e) => return quiz_error_response(&e),
    };

    let catalog = match state.catalog.catalog(&state.listing).await {
        Ok(catalog) => catalog,
        Err(e) => return catalog_error_response(&e),
    };

    let options = state.ranking.options(req.min_match_percentage, req.top_n);
    let ranking = state.engine.rank(&profile, &catalog, &options);

    tracing::info!(
        "Session {}: {} of {} vehicles matched at >= {}%",
        id,
        ranking.matches.len(),
        ranking.total_candidates,
        options.min_match_percentage
    );

    HttpResponse::Ok().json(RankResponse { profile, ranking })
}
