use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;
use std::collections::HashMap;

use super::{answer_from_row, question_from_row};
use crate::domain::models::{Answer, Question};
use crate::domain::validation::NewQuestion;
use crate::storage::connection::DbConnection;
use crate::storage::traits::QuestionStorage;

/// Repository for question operations
#[derive(Clone)]
pub struct QuestionRepository {
    db: DbConnection,
}

impl QuestionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl QuestionStorage for QuestionRepository {
    async fn create_question(&self, question: &NewQuestion) -> Result<Question> {
        let mut ticket = self.db.insert_gate().enter().await;
        let created_at = ticket.timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO questions (text, created_at)
            VALUES (?, ?)
            "#,
        )
        .bind(question.text.as_str())
        .bind(created_at)
        .execute(self.db.pool())
        .await?;

        Ok(Question {
            id: result.last_insert_rowid(),
            text: question.text.as_str().to_string(),
            created_at,
            answers: Vec::new(),
        })
    }

    async fn list_questions(&self) -> Result<Vec<Question>> {
        // Both reads share one snapshot so no answer can point at a
        // question missing from the list.
        let mut tx = self.db.pool().begin().await?;

        let question_rows = sqlx::query(
            r#"
            SELECT id, text, created_at
            FROM questions
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let answer_rows = sqlx::query(
            r#"
            SELECT id, question_id, user_id, text, created_at
            FROM answers
            ORDER BY question_id ASC, id ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut answers_by_question: HashMap<i64, Vec<Answer>> = HashMap::new();
        for row in &answer_rows {
            let answer = answer_from_row(row)?;
            answers_by_question
                .entry(answer.question_id)
                .or_default()
                .push(answer);
        }

        question_rows
            .iter()
            .map(|row| {
                let id: i64 = row.try_get("id")?;
                let answers = answers_by_question.remove(&id).unwrap_or_default();
                question_from_row(row, answers)
            })
            .collect()
    }

    async fn get_question(&self, question_id: i64) -> Result<Option<Question>> {
        let mut tx = self.db.pool().begin().await?;

        let row = sqlx::query(
            r#"
            SELECT id, text, created_at
            FROM questions
            WHERE id = ?
            "#,
        )
        .bind(question_id)
        .fetch_optional(&mut *tx)
        .await?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let answer_rows = sqlx::query(
            r#"
            SELECT id, question_id, user_id, text, created_at
            FROM answers
            WHERE question_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(question_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let answers = answer_rows
            .iter()
            .map(answer_from_row)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(question_from_row(&row, answers)?))
    }

    async fn question_exists(&self, question_id: i64) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1 FROM questions WHERE id = ?
            "#,
        )
        .bind(question_id)
        .fetch_optional(self.db.pool())
        .await?
        .is_some();

        Ok(exists)
    }

    async fn question_text(&self, question_id: i64) -> Result<Option<String>> {
        let text = sqlx::query_scalar(
            r#"
            SELECT text FROM questions WHERE id = ?
            "#,
        )
        .bind(question_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(text)
    }

    async fn delete_question(&self, question_id: i64) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        // The foreign key cascades as well; deleting answers explicitly keeps
        // the operation atomic even on a connection with foreign keys off.
        sqlx::query(
            r#"
            DELETE FROM answers WHERE question_id = ?
            "#,
        )
        .bind(question_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            r#"
            DELETE FROM questions WHERE id = ?
            "#,
        )
        .bind(question_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::{NewAnswer, ValidText};
    use crate::storage::repositories::AnswerRepository;
    use crate::storage::traits::AnswerStorage;
    use chrono::Utc;
    use uuid::Uuid;

    async fn setup_test() -> (QuestionRepository, AnswerRepository) {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        (QuestionRepository::new(db.clone()), AnswerRepository::new(db))
    }

    fn new_question(text: &str) -> NewQuestion {
        NewQuestion {
            text: ValidText::parse(Some(text)).unwrap(),
        }
    }

    fn new_answer(question_id: i64, text: &str) -> NewAnswer {
        NewAnswer {
            question_id,
            text: ValidText::parse(Some(text)).unwrap(),
            user_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_question() {
        let (questions, _) = setup_test().await;
        let before = Utc::now();

        let created = questions
            .create_question(&new_question("What is Rust?"))
            .await
            .expect("Failed to create question");

        assert!(created.id > 0);
        assert!(created.created_at >= before);
        assert!(created.answers.is_empty());

        let fetched = questions
            .get_question(created.id)
            .await
            .expect("Failed to get question")
            .expect("Question should exist");

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_nonexistent_question() {
        let (questions, _) = setup_test().await;

        let question = questions.get_question(404).await.expect("Failed to query question");
        assert!(question.is_none());
        assert!(!questions.question_exists(404).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_questions_in_insertion_order_with_answers() {
        let (questions, answers) = setup_test().await;

        let first = questions.create_question(&new_question("First")).await.unwrap();
        let second = questions.create_question(&new_question("Second")).await.unwrap();
        let third = questions.create_question(&new_question("Third")).await.unwrap();

        answers.create_answer(&new_answer(second.id, "b1")).await.unwrap();
        answers.create_answer(&new_answer(first.id, "a1")).await.unwrap();
        answers.create_answer(&new_answer(second.id, "b2")).await.unwrap();

        let listed = questions.list_questions().await.expect("Failed to list questions");

        let ids: Vec<i64> = listed.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);

        let texts = |q: &Question| q.answers.iter().map(|a| a.text.clone()).collect::<Vec<_>>();
        assert_eq!(texts(&listed[0]), vec!["a1"]);
        assert_eq!(texts(&listed[1]), vec!["b1", "b2"]);
        assert!(listed[2].answers.is_empty());
    }

    #[tokio::test]
    async fn test_delete_question_cascades_to_answers() {
        let (questions, answers) = setup_test().await;

        let question = questions.create_question(&new_question("Doomed")).await.unwrap();
        let other = questions.create_question(&new_question("Survivor")).await.unwrap();

        let mut doomed_ids = Vec::new();
        for i in 0..3 {
            let answer = answers
                .create_answer(&new_answer(question.id, &format!("Answer {}", i)))
                .await
                .unwrap()
                .unwrap();
            doomed_ids.push(answer.id);
        }
        let kept = answers
            .create_answer(&new_answer(other.id, "Kept"))
            .await
            .unwrap()
            .unwrap();

        assert!(questions.delete_question(question.id).await.unwrap());

        for id in doomed_ids {
            assert!(answers.get_answer(id).await.unwrap().is_none());
        }
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM answers WHERE question_id = ?")
            .bind(question.id)
            .fetch_one(questions.db.pool())
            .await
            .unwrap();
        assert_eq!(remaining, 0);

        assert!(answers.get_answer(kept.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_question_text() {
        let (questions, answers) = setup_test().await;

        let question = questions.create_question(&new_question("Only the text")).await.unwrap();
        answers.create_answer(&new_answer(question.id, "Not loaded")).await.unwrap();

        let text = questions.question_text(question.id).await.unwrap();
        assert_eq!(text.as_deref(), Some("Only the text"));
        assert_eq!(questions.question_text(404).await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_keep_timestamps_in_id_order() {
        let (questions, answers) = setup_test().await;
        let parent = questions.create_question(&new_question("Parent")).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..16 {
            let questions = questions.clone();
            let answers = answers.clone();
            handles.push(tokio::spawn(async move {
                questions
                    .create_question(&new_question(&format!("Question {}", i)))
                    .await
                    .unwrap();
                answers
                    .create_answer(&new_answer(parent.id, &format!("Answer {}", i)))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let listed = questions.list_questions().await.unwrap();
        assert_eq!(listed.len(), 17);
        assert!(listed
            .windows(2)
            .all(|pair| pair[0].created_at <= pair[1].created_at));

        let replies = &listed[0].answers;
        assert_eq!(replies.len(), 16);
        assert!(replies
            .windows(2)
            .all(|pair| pair[0].created_at <= pair[1].created_at));
    }

    #[tokio::test]
    async fn test_delete_nonexistent_question() {
        let (questions, _) = setup_test().await;

        assert!(!questions.delete_question(12345).await.unwrap());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let (questions, _) = setup_test().await;

        let first = questions.create_question(&new_question("One")).await.unwrap();
        questions.delete_question(first.id).await.unwrap();
        let second = questions.create_question(&new_question("Two")).await.unwrap();

        assert!(second.id > first.id);
    }
}
