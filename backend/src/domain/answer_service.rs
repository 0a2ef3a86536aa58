//! Answer service: answers are always created under an existing question.
use crate::domain::commands::CreateAnswerCommand;
use crate::domain::errors::{Entity, QaError, QaResult};
use crate::domain::events::SharedEventSink;
use crate::domain::models::Answer;
use crate::domain::validation::validate_answer;
use crate::storage::traits::{AnswerStorage, Connection, QuestionStorage};
use crate::storage::DbConnection;

/// Service for creating, reading and deleting answers
#[derive(Clone)]
pub struct AnswerService<C: Connection = DbConnection> {
    questions: C::QuestionRepository,
    answers: C::AnswerRepository,
    events: SharedEventSink,
}

impl<C: Connection> AnswerService<C> {
    pub fn new(connection: &C, events: SharedEventSink) -> Self {
        Self {
            questions: connection.create_question_repository(),
            answers: connection.create_answer_repository(),
            events,
        }
    }

    /// Answer an existing question.
    ///
    /// The parent is checked before the input is validated, so a missing
    /// question is reported as `QuestionNotFound` even for invalid input.
    pub async fn create_answer(
        &self,
        question_id: i64,
        command: CreateAnswerCommand,
    ) -> QaResult<Answer> {
        self.ensure_question_exists(question_id).await?;

        let new_answer = validate_answer(question_id, &command)?;

        let answer = match self.answers.create_answer(&new_answer).await? {
            Some(answer) => answer,
            // The question disappeared between the check and the insert
            None => return Err(self.question_not_found(question_id)),
        };

        self.events.info(&format!(
            "Answer created: ID {}, question ID {}, user: {}",
            answer.id, answer.question_id, answer.user_id
        ));

        Ok(answer)
    }

    /// Fail with `QuestionNotFound` unless the question can be answered.
    ///
    /// Callers that decode the request body themselves run this first so that
    /// an undecodable body never hides a missing question.
    pub async fn ensure_question_exists(&self, question_id: i64) -> QaResult<()> {
        if self.questions.question_exists(question_id).await? {
            Ok(())
        } else {
            Err(self.question_not_found(question_id))
        }
    }

    pub async fn get_answer(&self, answer_id: i64) -> QaResult<Answer> {
        self.answers
            .get_answer(answer_id)
            .await?
            .ok_or_else(|| QaError::not_found(Entity::Answer, answer_id))
    }

    pub async fn delete_answer(&self, answer_id: i64) -> QaResult<()> {
        let answer = self.get_answer(answer_id).await?;

        self.events.warn(&format!(
            "Deleting answer: ID {}, question ID {}",
            answer.id, answer.question_id
        ));

        if !self.answers.delete_answer(answer_id).await? {
            return Err(QaError::not_found(Entity::Answer, answer_id));
        }

        self.events.info(&format!("Answer ID {} deleted", answer_id));

        Ok(())
    }

    fn question_not_found(&self, question_id: i64) -> QaError {
        self.events.warn(&format!(
            "Attempt to answer non-existent question ID {}",
            question_id
        ));
        QaError::QuestionNotFound(question_id)
    }
}
