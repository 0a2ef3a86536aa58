//! Translation of domain errors and request rejections into HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::collections::BTreeMap;
use tracing::error;

use crate::domain::errors::QaError;
use crate::domain::validation::ValidationErrors;
use shared::{DetailResponse, ErrorResponse};

pub const NOT_FOUND_DETAIL: &str = "Not found.";

/// Field-keyed error arrays, e.g. `{"text": ["This field may not be blank."]}`
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<&'static str, Vec<String>> {
    let mut fields: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
    for error in errors.errors() {
        fields.entry(error.field()).or_default().push(error.to_string());
    }
    fields
}

/// The generic 404 used for direct entity lookups and unknown routes
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(DetailResponse::new(NOT_FOUND_DETAIL))).into_response()
}

/// A request body that could not be decoded as the expected JSON
pub fn json_rejection(rejection: JsonRejection) -> Response {
    let status = match &rejection {
        JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(DetailResponse::new(rejection.body_text()))).into_response()
}

impl IntoResponse for QaError {
    fn into_response(self) -> Response {
        match self {
            QaError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(field_errors(&errors))).into_response()
            }
            QaError::NotFound { .. } => not_found(),
            QaError::QuestionNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            QaError::Storage(e) => {
                error!("Storage failure: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(DetailResponse::new("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::CreateAnswerCommand;
    use crate::domain::errors::Entity;
    use crate::domain::validation::validate_answer;

    #[test]
    fn test_field_errors_group_by_field() {
        let errors = validate_answer(
            1,
            &CreateAnswerCommand {
                text: Some(" ".into()),
                user_id: Some("bogus".into()),
            },
        )
        .unwrap_err();

        let fields = field_errors(&errors);
        assert_eq!(fields["text"], vec!["This field may not be blank.".to_string()]);
        assert_eq!(fields["user_id"], vec!["Must be a valid UUID.".to_string()]);
    }

    #[test]
    fn test_status_codes() {
        let not_found = QaError::not_found(Entity::Answer, 1).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let question_missing = QaError::QuestionNotFound(1).into_response();
        assert_eq!(question_missing.status(), StatusCode::NOT_FOUND);

        let storage = QaError::Storage(anyhow::anyhow!("disk on fire")).into_response();
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
