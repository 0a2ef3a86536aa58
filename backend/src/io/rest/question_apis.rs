//! # REST API for Questions
//!
//! Endpoints for listing, creating, retrieving and deleting questions.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use super::mappers::error_mapper::{json_rejection, not_found};
use super::mappers::question_mapper::QuestionMapper;
use crate::AppState;
use shared::CreateQuestionRequest;

/// List all questions with their answers
pub async fn list_questions(State(state): State<AppState>) -> Response {
    state.events.info("GET /questions/");

    match state.question_service.list_questions().await {
        Ok(questions) => (StatusCode::OK, Json(QuestionMapper::to_list_dto(questions))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new question
pub async fn create_question(
    State(state): State<AppState>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Response {
    state.events.info("POST /questions/");

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection(rejection),
    };

    match state
        .question_service
        .create_question(QuestionMapper::to_command(request))
        .await
    {
        Ok(question) => (StatusCode::CREATED, Json(QuestionMapper::to_dto(question))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a question with its answers
pub async fn get_question(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let Ok(Path(question_id)) = path else {
        return not_found();
    };
    state.events.info(&format!("GET /questions/{}/", question_id));

    match state.question_service.get_question(question_id).await {
        Ok(question) => (StatusCode::OK, Json(QuestionMapper::to_dto(question))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a question and all of its answers
pub async fn delete_question(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let Ok(Path(question_id)) = path else {
        return not_found();
    };
    state.events.warn(&format!("DELETE /questions/{}/", question_id));

    match state.question_service.delete_question(question_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::io::rest::test_support::setup_test_app;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use chrono::{DateTime, Utc};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_list_questions_empty() {
        let app = setup_test_app().await;

        let (status, body) = app.send(Method::GET, "/questions/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_create_question_trims_text() {
        let app = setup_test_app().await;
        let before = Utc::now();

        let (status, body) = app
            .send(Method::POST, "/questions/", Some(json!({ "text": "  Hi  " })))
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["text"], "Hi");
        assert!(body["id"].as_i64().is_some());
        assert_eq!(body["answers"], json!([]));

        let created_at: DateTime<Utc> = body["created_at"].as_str().unwrap().parse().unwrap();
        // Serialized with microsecond precision
        assert!(created_at >= before - chrono::Duration::microseconds(1));
    }

    #[tokio::test]
    async fn test_create_question_blank_text() {
        let app = setup_test_app().await;

        for text in ["", "   ", "\t\n"] {
            let (status, body) = app
                .send(Method::POST, "/questions/", Some(json!({ "text": text })))
                .await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "text": ["This field may not be blank."] }));
        }

        let (_, listed) = app.send(Method::GET, "/questions/", None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_create_question_missing_or_too_long_text() {
        let app = setup_test_app().await;

        let (status, body) = app.send(Method::POST, "/questions/", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "text": ["This field is required."] }));

        let (status, body) = app
            .send(Method::POST, "/questions/", Some(json!({ "text": "x".repeat(1001) })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "text": ["Ensure this field has no more than 1000 characters."] })
        );
    }

    #[tokio::test]
    async fn test_create_question_non_string_text() {
        let app = setup_test_app().await;

        for text in [json!(5), json!(true), json!(["a"]), json!({ "a": 1 })] {
            let (status, body) = app
                .send(Method::POST, "/questions/", Some(json!({ "text": text })))
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "text": ["Not a valid string."] }));
        }

        let (_, questions) = app.send(Method::GET, "/questions/", None).await;
        assert_eq!(questions, json!([]));
    }

    #[tokio::test]
    async fn test_create_question_ignores_extra_fields() {
        let app = setup_test_app().await;

        let (status, body) = app
            .send(
                Method::POST,
                "/questions/",
                Some(json!({ "text": "Real", "id": 999, "created_at": "1999-01-01T00:00:00Z" })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_ne!(body["id"], 999);
        assert_ne!(body["created_at"], "1999-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn test_create_question_malformed_body() {
        let app = setup_test_app().await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/questions/")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = app.send_request(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/questions/")
            .body(Body::from(r#"{"text": "no content type"}"#))
            .unwrap();
        let (status, _) = app.send_request(request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_get_question_round_trip() {
        let app = setup_test_app().await;
        let created = app.create_question("What is a lifetime?").await;
        let id = created["id"].as_i64().unwrap();

        let (status, body) = app.send(Method::GET, &format!("/questions/{}/", id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], created["text"]);
        assert_eq!(body["created_at"], created["created_at"]);
        assert_eq!(body["answers"], json!([]));
    }

    #[tokio::test]
    async fn test_get_question_includes_answers() {
        let app = setup_test_app().await;
        let question = app.create_question("Tabs or spaces?").await;
        let id = question["id"].as_i64().unwrap();

        let first = app.create_answer(id, "Tabs").await;
        let second = app.create_answer(id, "Spaces").await;

        let (status, body) = app.send(Method::GET, &format!("/questions/{}", id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answers"], json!([first, second]));
    }

    #[tokio::test]
    async fn test_list_questions_in_creation_order() {
        let app = setup_test_app().await;
        let first = app.create_question("First").await;
        let second = app.create_question("Second").await;
        let answer = app.create_answer(first["id"].as_i64().unwrap(), "Reply").await;

        let (status, body) = app.send(Method::GET, "/questions", None).await;

        assert_eq!(status, StatusCode::OK);
        let listed = body.as_array().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["id"], first["id"]);
        assert_eq!(listed[1]["id"], second["id"]);
        assert_eq!(listed[0]["answers"], json!([answer]));
        assert_eq!(listed[1]["answers"], json!([]));
    }

    #[tokio::test]
    async fn test_get_missing_question() {
        let app = setup_test_app().await;

        let (status, body) = app.send(Method::GET, "/questions/42/", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Not found." }));

        let (status, body) = app.send(Method::GET, "/questions/abc/", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Not found." }));
    }

    #[tokio::test]
    async fn test_delete_question() {
        let app = setup_test_app().await;
        let created = app.create_question("Delete me").await;
        let uri = format!("/questions/{}/", created["id"]);

        let (status, body) = app.send(Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = app.send(Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = app.send(Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Not found." }));
    }

    #[tokio::test]
    async fn test_requests_are_logged_through_event_sink() {
        let app = setup_test_app().await;

        app.send(Method::GET, "/questions/", None).await;

        assert!(app
            .events
            .events()
            .iter()
            .any(|(_, message)| message == "GET /questions/"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = setup_test_app().await;

        let (status, body) = app.send(Method::GET, "/nothing-here/", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Not found." }));
    }
}
