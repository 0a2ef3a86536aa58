//! Error taxonomy for the question and answer services.

use std::fmt;
use thiserror::Error;

use super::validation::ValidationErrors;

/// Kind of entity a lookup was made for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Question,
    Answer,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Question => f.write_str("Question"),
            Entity::Answer => f.write_str("Answer"),
        }
    }
}

#[derive(Debug, Error)]
pub enum QaError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Direct lookup or delete of an entity that does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i64 },

    /// Answer creation under a question that does not exist
    #[error("Cannot add an answer to a question that does not exist")]
    QuestionNotFound(i64),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl QaError {
    pub fn not_found(entity: Entity, id: i64) -> Self {
        QaError::NotFound { entity, id }
    }
}

pub type QaResult<T> = std::result::Result<T, QaError>;
