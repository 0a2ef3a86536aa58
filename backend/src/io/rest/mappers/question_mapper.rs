//! backend/src/io/rest/mappers/question_mapper.rs

use super::answer_mapper::{format_timestamp, raw_field, AnswerMapper};
use crate::domain::commands::CreateQuestionCommand;
use crate::domain::models::Question as DomainQuestion;
use shared::{CreateQuestionRequest, Question as SharedQuestion};

/// Mapper between shared question DTOs and domain questions.
pub struct QuestionMapper;

impl QuestionMapper {
    pub fn to_dto(domain: DomainQuestion) -> SharedQuestion {
        SharedQuestion {
            id: domain.id,
            text: domain.text,
            created_at: format_timestamp(&domain.created_at),
            answers: domain.answers.into_iter().map(AnswerMapper::to_dto).collect(),
        }
    }

    pub fn to_list_dto(domain_questions: Vec<DomainQuestion>) -> Vec<SharedQuestion> {
        domain_questions.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_command(request: CreateQuestionRequest) -> CreateQuestionCommand {
        CreateQuestionCommand {
            text: raw_field(request.text),
        }
    }
}
