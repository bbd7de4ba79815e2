// HTTP route handlers for the LearnLab API

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use learnlab_common::types::{ChapterDetail, ChapterSummary, Language, LessonView};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::metrics;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChapterQuery {
    pub language: Option<String>,
}

/// Free-form verification: the caller supplies the expected output
#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub expected_output: String,
    #[serde(default)]
    pub actual_output: String,
    #[serde(default)]
    pub user_code: String,
}

/// Lesson verification: the expected output comes from the catalog
#[derive(Debug, Default, Deserialize)]
pub struct LessonVerifyRequest {
    #[serde(default)]
    pub actual_output: String,
    #[serde(default)]
    pub user_code: String,
}

#[derive(Debug, Serialize)]
pub struct SolutionResponse {
    pub lesson_id: String,
    pub solution_code: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": message.into()
        })),
    )
        .into_response()
}

/// GET /health - Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    metrics::record_request("health");
    (StatusCode::OK, "OK")
}

/// GET /languages - Languages with chapter and lesson counts
pub async fn list_languages(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    metrics::record_request("languages");
    Json(state.catalog.languages())
}

/// GET /chapters?language= - Chapter summaries, optionally for one language
pub async fn list_chapters(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChapterQuery>,
) -> Response {
    metrics::record_request("chapters");

    let chapters: Vec<ChapterSummary> = match query.language.as_deref() {
        Some(raw) => match raw.parse::<Language>() {
            Ok(language) => state
                .catalog
                .chapters_for(language)
                .map(ChapterSummary::from)
                .collect(),
            Err(e) => {
                warn!(language = %raw, "Rejected chapter filter");
                return error_response(StatusCode::BAD_REQUEST, e.to_string());
            }
        },
        None => state
            .catalog
            .chapters()
            .iter()
            .map(ChapterSummary::from)
            .collect(),
    };

    (StatusCode::OK, Json(chapters)).into_response()
}

/// GET /chapters/:chapter_id - Chapter with its lesson titles
pub async fn get_chapter(
    State(state): State<Arc<AppState>>,
    Path(chapter_id): Path<String>,
) -> Response {
    metrics::record_request("chapter");

    match state.catalog.chapter(&chapter_id) {
        Some(chapter) => (StatusCode::OK, Json(ChapterDetail::from(chapter))).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("Chapter not found: {}", chapter_id),
        ),
    }
}

/// GET /lessons/:lesson_id - Lesson content without the solution
pub async fn get_lesson(
    State(state): State<Arc<AppState>>,
    Path(lesson_id): Path<String>,
) -> Response {
    metrics::record_request("lesson");

    match state.catalog.lesson(&lesson_id) {
        Some((chapter, lesson)) => {
            (StatusCode::OK, Json(LessonView::new(chapter, lesson))).into_response()
        }
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("Lesson not found: {}", lesson_id),
        ),
    }
}

/// GET /lessons/:lesson_id/solution - Reference solution
pub async fn get_solution(
    State(state): State<Arc<AppState>>,
    Path(lesson_id): Path<String>,
) -> Response {
    metrics::record_request("solution");

    match state.catalog.lesson(&lesson_id) {
        Some((_, lesson)) => {
            info!(lesson_id = %lesson_id, "Solution revealed");
            (
                StatusCode::OK,
                Json(SolutionResponse {
                    lesson_id: lesson.id.clone(),
                    solution_code: lesson.solution_code.clone(),
                }),
            )
                .into_response()
        }
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("Lesson not found: {}", lesson_id),
        ),
    }
}

/// POST /verify - Grade output against a caller-supplied expectation
pub async fn verify_output(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<VerifyRequest>,
) -> Response {
    metrics::record_request("verify");

    let result = state.verifier.verify(
        &payload.expected_output,
        &payload.actual_output,
        &payload.user_code,
    );
    metrics::record_verification(result.correct);

    info!(
        correct = result.correct,
        feedback = %result.feedback,
        code_size = payload.user_code.len(),
        "Output verified"
    );

    (StatusCode::OK, Json(result)).into_response()
}

/// POST /lessons/:lesson_id/verify - Grade output against the lesson's expectation
pub async fn verify_lesson(
    State(state): State<Arc<AppState>>,
    Path(lesson_id): Path<String>,
    Json(payload): Json<LessonVerifyRequest>,
) -> Response {
    metrics::record_request("lesson_verify");

    let Some((chapter, lesson)) = state.catalog.lesson(&lesson_id) else {
        warn!(lesson_id = %lesson_id, "Verification requested for unknown lesson");
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Lesson not found: {}", lesson_id),
        );
    };

    let result = state.verifier.verify(
        &lesson.expected_output,
        &payload.actual_output,
        &payload.user_code,
    );
    metrics::record_verification(result.correct);

    info!(
        lesson_id = %lesson_id,
        language = %chapter.language,
        correct = result.correct,
        feedback = %result.feedback,
        "Lesson submission verified"
    );

    (StatusCode::OK, Json(result)).into_response()
}

/// GET /metrics - Prometheus exposition
pub async fn metrics_endpoint() -> Response {
    metrics::record_request("metrics");
    match metrics::render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render metrics");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render metrics: {}", e),
            )
        }
    }
}
