//! Domain model for a question.
use chrono::{DateTime, Utc};
use std::fmt;

use super::{excerpt, Answer};

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Eagerly loaded answers, ascending by id
    pub answers: Vec<Answer>,
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Question: {}...", excerpt(&self.text))
    }
}
