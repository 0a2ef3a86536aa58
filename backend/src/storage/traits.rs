//! # Storage Traits
//!
//! Storage abstraction traits that let the domain layer work with any
//! backend that can keep questions and their answers consistent.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{Answer, Question};
use crate::domain::validation::{NewAnswer, NewQuestion};

/// Trait defining the interface for question storage operations
#[async_trait]
pub trait QuestionStorage: Send + Sync {
    /// Persist a new question with a generated id and creation timestamp
    async fn create_question(&self, question: &NewQuestion) -> Result<Question>;

    /// List every question with its answers eagerly loaded, ascending by id
    async fn list_questions(&self) -> Result<Vec<Question>>;

    /// Retrieve a question with its answers
    async fn get_question(&self, question_id: i64) -> Result<Option<Question>>;

    /// Check whether a question exists without loading it
    async fn question_exists(&self, question_id: i64) -> Result<bool>;

    /// Fetch only the text of a question, without its answers
    async fn question_text(&self, question_id: i64) -> Result<Option<String>>;

    /// Delete a question and all of its answers atomically.
    /// Returns true if the question was found and deleted, false otherwise
    async fn delete_question(&self, question_id: i64) -> Result<bool>;
}

/// Trait defining the interface for answer storage operations
#[async_trait]
pub trait AnswerStorage: Send + Sync {
    /// Persist a new answer under its question.
    /// Returns None if the question does not exist at insert time
    async fn create_answer(&self, answer: &NewAnswer) -> Result<Option<Answer>>;

    /// Retrieve a specific answer by ID
    async fn get_answer(&self, answer_id: i64) -> Result<Option<Answer>>;

    /// Delete a single answer.
    /// Returns true if the answer was found and deleted, false otherwise
    async fn delete_answer(&self, answer_id: i64) -> Result<bool>;
}

/// Trait defining the interface for storage connections
///
/// Abstracts the concrete connection type and hands out repositories, so
/// services never name a storage implementation directly.
pub trait Connection: Send + Sync + Clone {
    type QuestionRepository: QuestionStorage + Clone;
    type AnswerRepository: AnswerStorage + Clone;

    fn create_question_repository(&self) -> Self::QuestionRepository;

    fn create_answer_repository(&self) -> Self::AnswerRepository;
}
