//! # REST API Interface Layer
//!
//! HTTP endpoints for questions and answers. This layer only decodes
//! requests, calls the domain services and maps results (and errors) to
//! status codes and JSON bodies; it holds no business rules.
//!
//! Every route is served both with and without a trailing slash.

pub mod answer_apis;
pub mod mappers;
pub mod question_apis;

use axum::{
    routing::{get, post, MethodRouter},
    Router,
};

use crate::AppState;

/// Build the API routes, without state or middleware
pub fn router() -> Router<AppState> {
    let routes = [
        (
            "/questions",
            get(question_apis::list_questions).post(question_apis::create_question),
        ),
        (
            "/questions/:question_id",
            get(question_apis::get_question).delete(question_apis::delete_question),
        ),
        (
            "/questions/:question_id/answers",
            post(answer_apis::create_answer),
        ),
        (
            "/answers/:answer_id",
            get(answer_apis::get_answer).delete(answer_apis::delete_answer),
        ),
    ];

    routes
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            route_with_trailing_slash(router, path, method_router)
        })
        .fallback(fallback)
}

fn route_with_trailing_slash(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(&format!("{}/", path), method_router.clone())
        .route(path, method_router)
}

async fn fallback() -> axum::response::Response {
    mappers::error_mapper::not_found()
}
