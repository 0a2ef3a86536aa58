//! Domain models for questions and answers.

pub mod answer;
pub mod question;

pub use answer::Answer;
pub use question::Question;

/// Number of characters shown when an entity is rendered for humans
pub const EXCERPT_CHARS: usize = 50;

/// First `EXCERPT_CHARS` characters of `text`, split on char boundaries
pub fn excerpt(text: &str) -> &str {
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
