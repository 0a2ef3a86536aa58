use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A question as exposed over HTTP, with its answers nested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    /// Trimmed question text (1..=1000 characters)
    pub text: String,
    /// Creation timestamp (RFC 3339, UTC)
    pub created_at: String,
    /// Answers ordered by creation (ascending id)
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// An answer as exposed over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    /// ID of the question this answer belongs to
    pub question_id: i64,
    /// Author of the answer
    pub user_id: Uuid,
    /// Trimmed answer text (1..=1000 characters)
    pub text: String,
    /// Creation timestamp (RFC 3339, UTC)
    pub created_at: String,
}

/// Body of `POST /questions/`.
///
/// Fields are kept as loose JSON so that a missing or wrongly typed value
/// surfaces as a field validation error instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateQuestionRequest {
    #[serde(default)]
    pub text: Option<Value>,
}

/// Body of `POST /questions/{id}/answers/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAnswerRequest {
    #[serde(default)]
    pub text: Option<Value>,
    /// Canonical hyphenated UUID; generated by the server when absent
    #[serde(default)]
    pub user_id: Option<Value>,
}

/// Domain-specific error body, e.g. answering a question that does not exist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Generic error body used for lookups, decoding failures and server errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
