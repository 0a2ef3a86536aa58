use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use super::repositories::{AnswerRepository, QuestionRepository};
use super::traits::Connection;

// The database URL used when nothing is configured
pub const DEFAULT_DATABASE_URL: &str = "sqlite:qa.db";

/// Serializes inserts so that creation timestamps follow id order.
///
/// Hold the ticket from [`InsertGate::enter`] until the insert has committed;
/// the gate must be entered before a pool connection is acquired.
#[derive(Clone, Default)]
pub struct InsertGate {
    last: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl InsertGate {
    pub async fn enter(&self) -> InsertTicket<'_> {
        InsertTicket(self.last.lock().await)
    }
}

pub struct InsertTicket<'a>(MutexGuard<'a, Option<DateTime<Utc>>>);

impl InsertTicket<'_> {
    /// The current UTC time, never earlier than a timestamp handed out before
    pub fn timestamp(&mut self) -> DateTime<Utc> {
        let now = match *self.0 {
            Some(last) if last > Utc::now() => last,
            _ => Utc::now(),
        };
        *self.0 = Some(now);
        now
    }
}

/// DbConnection manages the SQLite pool and schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
    insert_gate: InsertGate,
}

impl DbConnection {
    /// Open (creating if necessary) the database at `url`
    pub async fn new(url: &str, max_connections: u32) -> Result<Self> {
        // Cascade deletes rely on foreign key enforcement, which SQLite
        // switches on per connection.
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self::from_pool(pool))
    }

    /// Initialize a private in-memory database for a single test
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // A single connection that never expires keeps the in-memory
        // database alive for the lifetime of the pool.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self::from_pool(pool))
    }

    fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool: Arc::new(pool),
            insert_gate: InsertGate::default(),
        }
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Gate shared by every repository created from this connection
    pub fn insert_gate(&self) -> &InsertGate {
        &self.insert_gate
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // AUTOINCREMENT keeps ids of deleted rows from being handed out again
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL CHECK (length(trim(text)) > 0),
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS answers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question_id INTEGER NOT NULL,
                user_id TEXT NOT NULL,
                text TEXT NOT NULL CHECK (length(trim(text)) > 0),
                created_at TEXT NOT NULL,
                FOREIGN KEY (question_id) REFERENCES questions (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for loading the answers of a question
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_answers_question_id
            ON answers(question_id, id);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type QuestionRepository = QuestionRepository;
    type AnswerRepository = AnswerRepository;

    fn create_question_repository(&self) -> Self::QuestionRepository {
        QuestionRepository::new(self.clone())
    }

    fn create_answer_repository(&self) -> Self::AnswerRepository {
        AnswerRepository::new(self.clone())
    }
}
