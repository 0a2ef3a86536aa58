//! # Q&A Backend
//!
//! A small question and answer service: clients create questions, answer
//! them, read them back with their answers and delete either entity.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (validation, services, events)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{DatabaseConfig, ServerConfig};
use crate::domain::{AnswerService, QuestionService, SharedEventSink};
use crate::storage::DbConnection;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub question_service: QuestionService,
    pub answer_service: AnswerService,
    pub events: SharedEventSink,
}

impl AppState {
    pub fn new(db: &DbConnection, events: SharedEventSink) -> Self {
        Self {
            question_service: QuestionService::new(db, events.clone()),
            answer_service: AnswerService::new(db, events.clone()),
            events,
        }
    }
}

/// Open the database and build the services
pub async fn initialize_backend(
    database: &DatabaseConfig,
    events: SharedEventSink,
) -> Result<AppState> {
    info!("Setting up database at {}", database.url);
    let db_conn = DbConnection::new(&database.url, database.max_connections).await?;

    info!("Setting up application state");
    Ok(AppState::new(&db_conn, events))
}

/// Create the Axum router with all routes and middleware configured
pub fn create_router(app_state: AppState, server: &ServerConfig) -> Result<Router> {
    let mut router = io::rest::router().layer(TraceLayer::new_for_http());

    if let Some(origin) = &server.cors_origin {
        info!("Allowing cross-origin requests from {}", origin);
        let cors = CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers(Any);
        router = router.layer(cors);
    }

    Ok(router.with_state(app_state))
}
