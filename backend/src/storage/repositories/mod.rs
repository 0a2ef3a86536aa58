pub mod answer_repository;
pub mod question_repository;

pub use answer_repository::AnswerRepository;
pub use question_repository::QuestionRepository;

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::models::{Answer, Question};

pub(crate) fn answer_from_row(row: &SqliteRow) -> Result<Answer> {
    let user_id: String = row.try_get("user_id")?;
    Ok(Answer {
        id: row.try_get("id")?,
        question_id: row.try_get("question_id")?,
        user_id: Uuid::parse_str(&user_id)?,
        text: row.try_get("text")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn question_from_row(row: &SqliteRow, answers: Vec<Answer>) -> Result<Question> {
    Ok(Question {
        id: row.try_get("id")?,
        text: row.try_get("text")?,
        created_at: row.try_get("created_at")?,
        answers,
    })
}
