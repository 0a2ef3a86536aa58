//! # Storage Module
//!
//! Persistence for questions and answers.
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: SQLite through a pooled SQLx connection
//! - **Referential Integrity**: answers reference their question with
//!   `ON DELETE CASCADE`, and question deletion runs in one transaction
//! - **Testing**: every test gets a private in-memory database
//!
//! Services depend on the traits in [`traits`] rather than on SQLite.

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::{AnswerRepository, QuestionRepository};
pub use traits::{AnswerStorage, Connection, QuestionStorage};
