//! Question service: validation, persistence and events for questions.
use crate::domain::commands::CreateQuestionCommand;
use crate::domain::errors::{Entity, QaError, QaResult};
use crate::domain::events::SharedEventSink;
use crate::domain::models::{excerpt, Question};
use crate::domain::validation::validate_question;
use crate::storage::traits::{Connection, QuestionStorage};
use crate::storage::DbConnection;

/// Service for creating, reading and deleting questions
#[derive(Clone)]
pub struct QuestionService<C: Connection = DbConnection> {
    questions: C::QuestionRepository,
    events: SharedEventSink,
}

impl<C: Connection> QuestionService<C> {
    pub fn new(connection: &C, events: SharedEventSink) -> Self {
        Self {
            questions: connection.create_question_repository(),
            events,
        }
    }

    /// Validate and persist a new question
    pub async fn create_question(&self, command: CreateQuestionCommand) -> QaResult<Question> {
        let new_question = validate_question(&command)?;

        let question = self.questions.create_question(&new_question).await?;

        self.events.info(&format!(
            "Question created: ID {}, text: {}",
            question.id, question.text
        ));

        Ok(question)
    }

    /// List all questions with their answers, ascending by id
    pub async fn list_questions(&self) -> QaResult<Vec<Question>> {
        Ok(self.questions.list_questions().await?)
    }

    pub async fn get_question(&self, question_id: i64) -> QaResult<Question> {
        self.questions
            .get_question(question_id)
            .await?
            .ok_or_else(|| QaError::not_found(Entity::Question, question_id))
    }

    /// Delete a question together with all of its answers
    pub async fn delete_question(&self, question_id: i64) -> QaResult<()> {
        let text = self
            .questions
            .question_text(question_id)
            .await?
            .ok_or_else(|| QaError::not_found(Entity::Question, question_id))?;

        self.events.warn(&format!(
            "Deleting question: ID {}, text: {}...",
            question_id,
            excerpt(&text)
        ));

        if !self.questions.delete_question(question_id).await? {
            // Removed by a concurrent request after the lookup above
            return Err(QaError::not_found(Entity::Question, question_id));
        }

        self.events.info(&format!("Question ID {} deleted", question_id));

        Ok(())
    }
}
