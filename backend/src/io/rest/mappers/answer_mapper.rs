//! backend/src/io/rest/mappers/answer_mapper.rs

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::domain::commands::{CreateAnswerCommand, RawField};
use crate::domain::models::Answer as DomainAnswer;
use shared::{Answer as SharedAnswer, CreateAnswerRequest};

/// Mapper between shared answer DTOs and domain answers.
pub struct AnswerMapper;

impl AnswerMapper {
    pub fn to_dto(domain: DomainAnswer) -> SharedAnswer {
        SharedAnswer {
            id: domain.id,
            question_id: domain.question_id,
            user_id: domain.user_id,
            text: domain.text,
            created_at: format_timestamp(&domain.created_at),
        }
    }

    pub fn to_command(request: CreateAnswerRequest) -> CreateAnswerCommand {
        CreateAnswerCommand {
            text: raw_field(request.text),
            user_id: raw_field(request.user_id),
        }
    }
}

/// Keep strings as-is and flag any other JSON value for validation to reject
pub fn raw_field(value: Option<Value>) -> Option<RawField> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(RawField::Str(s)),
        _ => Some(RawField::NotAString),
    }
}

/// RFC 3339 in UTC with microsecond precision, e.g. `2024-05-01T10:00:00.123456Z`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}
