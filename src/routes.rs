// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{analysis, ask, exam, subjects},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (subjects, exams, analysis, ask).
/// * Serves the built frontend from `STATIC_DIR` for every other path, if configured.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let subject_routes = Router::new()
        .route("/", get(subjects::list_subjects))
        .route("/{subject_id}", get(subjects::get_subject));

    let exam_routes = Router::new()
        .route("/", post(exam::create_exam))
        .route("/{exam_id}", get(exam::get_exam))
        .route("/{exam_id}/answers/{question_id}", put(exam::set_answer))
        .route("/{exam_id}/submit", post(exam::submit_exam));

    let mut router = Router::new()
        .nest("/api/subjects", subject_routes)
        .nest("/api/exams", exam_routes)
        .route("/api/analysis", get(analysis::get_analysis))
        .route("/api/ask", post(ask::ask));

    if let Some(static_dir) = &state.config.static_dir {
        tracing::info!("Serving static files from {}", static_dir.display());
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    router
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
