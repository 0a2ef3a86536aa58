use anyhow::Result;
use async_trait::async_trait;

use super::answer_from_row;
use crate::domain::models::Answer;
use crate::domain::validation::NewAnswer;
use crate::storage::connection::DbConnection;
use crate::storage::traits::AnswerStorage;

/// Repository for answer operations
#[derive(Clone)]
pub struct AnswerRepository {
    db: DbConnection,
}

impl AnswerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnswerStorage for AnswerRepository {
    async fn create_answer(&self, answer: &NewAnswer) -> Result<Option<Answer>> {
        let mut ticket = self.db.insert_gate().enter().await;
        let mut tx = self.db.pool().begin().await?;

        // Existence check and insert share a transaction so a concurrent
        // question delete cannot leave the answer orphaned.
        let question_exists = sqlx::query(
            r#"
            SELECT 1 FROM questions WHERE id = ?
            "#,
        )
        .bind(answer.question_id)
        .fetch_optional(&mut *tx)
        .await?
        .is_some();

        if !question_exists {
            tx.rollback().await?;
            return Ok(None);
        }

        let created_at = ticket.timestamp();
        let result = sqlx::query(
            r#"
            INSERT INTO answers (question_id, user_id, text, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(answer.question_id)
        .bind(answer.user_id.hyphenated().to_string())
        .bind(answer.text.as_str())
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(Answer {
            id: result.last_insert_rowid(),
            question_id: answer.question_id,
            user_id: answer.user_id,
            text: answer.text.as_str().to_string(),
            created_at,
        }))
    }

    async fn get_answer(&self, answer_id: i64) -> Result<Option<Answer>> {
        let row = sqlx::query(
            r#"
            SELECT id, question_id, user_id, text, created_at
            FROM answers
            WHERE id = ?
            "#,
        )
        .bind(answer_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(answer_from_row).transpose()
    }

    async fn delete_answer(&self, answer_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM answers WHERE id = ?
            "#,
        )
        .bind(answer_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
