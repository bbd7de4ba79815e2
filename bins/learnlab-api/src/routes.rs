use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::AppState;

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/languages", get(handlers::list_languages))
        .route("/chapters", get(handlers::list_chapters))
        .route("/chapters/:chapter_id", get(handlers::get_chapter))
        .route("/lessons/:lesson_id", get(handlers::get_lesson))
        .route("/lessons/:lesson_id/solution", get(handlers::get_solution))
        .route("/lessons/:lesson_id/verify", post(handlers::verify_lesson))
        .route("/verify", post(handlers::verify_output))
        .route("/metrics", get(handlers::metrics_endpoint))
        .with_state(state)
}
