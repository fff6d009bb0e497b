pub mod jobs;
pub mod resume;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Assemble the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/search-jobs", post(jobs::search_jobs))
        .route("/api/improve-resume", post(resume::improve_resume))
        .route("/api/optimize-resume", post(resume::optimize_resume))
        .route("/api/resume-suggestions", post(resume::resume_suggestions))
        .route("/api/render-resume", post(resume::render_resume))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the AutoApply API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
