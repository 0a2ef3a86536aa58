//! # Domain Module
//!
//! Business rules for questions and answers, independent of HTTP and of the
//! storage backend.
//!
//! ## Module Organization
//!
//! - **validation**: one validation pass per entity producing typed input
//! - **question_service** / **answer_service**: orchestration of validation,
//!   storage and events
//! - **events**: the injected observability collaborator
//! - **errors**: the service error taxonomy
//!
//! ## Business Rules
//!
//! - Text is trimmed, non-blank and at most 1000 characters
//! - An answer always belongs to an existing question
//! - Deleting a question deletes its answers
//! - Nothing is updated after creation

pub mod answer_service;
pub mod commands;
pub mod errors;
pub mod events;
pub mod models;
pub mod question_service;
pub mod validation;

pub use answer_service::AnswerService;
pub use commands::*;
pub use errors::{Entity, QaError, QaResult};
pub use events::{EventSink, NoopEventSink, SharedEventSink, TracingEventSink};
pub use question_service::QuestionService;
