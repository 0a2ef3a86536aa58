//! Domain model for an answer.
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

use super::excerpt;

#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Answer to question {}: {}...",
            self.question_id,
            excerpt(&self.text)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_question_id() {
        let answer = Answer {
            id: 3,
            question_id: 12,
            user_id: Uuid::new_v4(),
            text: "A very long answer text that certainly has to be cut somewhere".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(
            answer.to_string(),
            "Answer to question 12: A very long answer text that certainly has to be c..."
        );
    }
}
