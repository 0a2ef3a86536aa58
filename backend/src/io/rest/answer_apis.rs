//! # REST API for Answers
//!
//! Answers are created under a question and addressed directly afterwards.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use super::mappers::answer_mapper::AnswerMapper;
use super::mappers::error_mapper::{json_rejection, not_found};
use crate::AppState;
use shared::CreateAnswerRequest;

/// Answer an existing question.
///
/// A missing question yields `404 {"error": ...}`, distinct from the generic
/// not-found body used by direct lookups. It takes precedence over any
/// problem with the request body, including one that cannot be decoded.
pub async fn create_answer(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateAnswerRequest>, JsonRejection>,
) -> Response {
    let Ok(Path(question_id)) = path else {
        return not_found();
    };
    state
        .events
        .info(&format!("POST /questions/{}/answers/", question_id));

    if let Err(e) = state.answer_service.ensure_question_exists(question_id).await {
        return e.into_response();
    }

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection(rejection),
    };

    match state
        .answer_service
        .create_answer(question_id, AnswerMapper::to_command(request))
        .await
    {
        Ok(answer) => (StatusCode::CREATED, Json(AnswerMapper::to_dto(answer))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get an answer by ID
pub async fn get_answer(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let Ok(Path(answer_id)) = path else {
        return not_found();
    };
    state.events.info(&format!("GET /answers/{}/", answer_id));

    match state.answer_service.get_answer(answer_id).await {
        Ok(answer) => (StatusCode::OK, Json(AnswerMapper::to_dto(answer))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete an answer
pub async fn delete_answer(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let Ok(Path(answer_id)) = path else {
        return not_found();
    };
    state.events.warn(&format!("DELETE /answers/{}/", answer_id));

    match state.answer_service.delete_answer(answer_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
