//! Domain-level command types.
//! These are what services accept; the REST layer maps the public DTOs from
//! the `shared` crate onto them. Fields are still raw, unvalidated input.

/// A client-supplied field as it arrived, before validation.
///
/// JSON `null` and an absent field are both represented by `None` on the
/// command, so this only distinguishes strings from everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawField {
    Str(String),
    /// A number, boolean, array or object
    NotAString,
}

impl RawField {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawField::Str(s) => Some(s),
            RawField::NotAString => None,
        }
    }
}

impl From<String> for RawField {
    fn from(s: String) -> Self {
        RawField::Str(s)
    }
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        RawField::Str(s.to_string())
    }
}

/// Input for creating a new question.
#[derive(Debug, Clone, Default)]
pub struct CreateQuestionCommand {
    pub text: Option<RawField>,
}

/// Input for answering an existing question.
#[derive(Debug, Clone, Default)]
pub struct CreateAnswerCommand {
    pub text: Option<RawField>,
    pub user_id: Option<RawField>,
}
