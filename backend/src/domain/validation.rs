//! Validation of client input for questions and answers.
//!
//! Every entity is validated in a single pass that either yields a typed,
//! storable value (`NewQuestion`, `NewAnswer`) or the full list of field
//! errors. Text is trimmed once here and never re-checked downstream.

use thiserror::Error;
use uuid::Uuid;

use super::commands::{CreateAnswerCommand, CreateQuestionCommand, RawField};

/// Upper bound on text length, counted in characters after trimming
pub const MAX_TEXT_CHARS: usize = 1000;

/// Why a text field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextProblem {
    #[error("This field is required.")]
    Missing,
    #[error("This field may not be blank.")]
    Blank,
    #[error("Not a valid string.")]
    NotAString,
    #[error("Ensure this field has no more than 1000 characters.")]
    TooLong,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    BlankText(TextProblem),
    #[error("Must be a valid UUID.")]
    InvalidUuid,
}

impl ValidationError {
    /// Name of the request field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::BlankText(_) => "text",
            ValidationError::InvalidUuid => "user_id",
        }
    }
}

/// All field errors found while validating one request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {} field error(s)", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.errors.contains(error)
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// Trimmed, non-blank text of at most `MAX_TEXT_CHARS` characters.
///
/// Only constructible through [`ValidText::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidText(String);

impl ValidText {
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let raw = raw.ok_or(ValidationError::BlankText(TextProblem::Missing))?;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::BlankText(TextProblem::Blank));
        }
        if trimmed.chars().count() > MAX_TEXT_CHARS {
            return Err(ValidationError::BlankText(TextProblem::TooLong));
        }

        Ok(Self(trimmed.to_string()))
    }

    fn from_field(raw: Option<&RawField>) -> Result<Self, ValidationError> {
        match raw {
            Some(RawField::NotAString) => Err(ValidationError::BlankText(TextProblem::NotAString)),
            raw => Self::parse(raw.and_then(RawField::as_str)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ValidText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A question that passed validation and can be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub text: ValidText,
}

/// An answer that passed validation and can be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub question_id: i64,
    pub text: ValidText,
    pub user_id: Uuid,
}

/// Parse a caller-supplied user id, generating a v4 UUID when absent.
///
/// Only the canonical hyphenated form is accepted; the simple, braced and
/// URN encodings are rejected even though they denote valid UUIDs.
pub fn parse_user_id(raw: Option<&str>) -> Result<Uuid, ValidationError> {
    match raw {
        None => Ok(Uuid::new_v4()),
        Some(raw) if raw.len() == 36 => {
            Uuid::try_parse(raw).map_err(|_| ValidationError::InvalidUuid)
        }
        Some(_) => Err(ValidationError::InvalidUuid),
    }
}

fn user_id_from_field(raw: Option<&RawField>) -> Result<Uuid, ValidationError> {
    match raw {
        Some(RawField::NotAString) => Err(ValidationError::InvalidUuid),
        raw => parse_user_id(raw.and_then(RawField::as_str)),
    }
}

pub fn validate_question(command: &CreateQuestionCommand) -> Result<NewQuestion, ValidationErrors> {
    let text = ValidText::from_field(command.text.as_ref())?;
    Ok(NewQuestion { text })
}

pub fn validate_answer(
    question_id: i64,
    command: &CreateAnswerCommand,
) -> Result<NewAnswer, ValidationErrors> {
    let mut errors = Vec::new();
    let text = ValidText::from_field(command.text.as_ref())
        .map_err(|e| errors.push(e))
        .ok();
    let user_id = user_id_from_field(command.user_id.as_ref())
        .map_err(|e| errors.push(e))
        .ok();

    match (text, user_id) {
        (Some(text), Some(user_id)) => Ok(NewAnswer {
            question_id,
            text,
            user_id,
        }),
        _ => Err(ValidationErrors { errors }),
    }
}
