//! Errors raised by the resource modules and their HTTP mapping.

use courselib_db::StoreError;
use courselib_http::error::AppError;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::courses::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("author {0} not found")]
    NotFoundParent(Uuid),

    #[error("{kind} {id} not found")]
    NotFoundResource { kind: &'static str, id: Uuid },

    /// A batch fetch found fewer resources than were requested.
    #[error("{} of the requested resources were not found", missing.len())]
    PartialNotFound { missing: Vec<Uuid> },

    #[error("validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LibraryError {
    pub fn author_not_found(id: Uuid) -> Self {
        Self::NotFoundResource { kind: "author", id }
    }

    pub fn course_not_found(id: Uuid) -> Self {
        Self::NotFoundResource { kind: "course", id }
    }
}

impl From<ValidationErrors> for LibraryError {
    fn from(errors: ValidationErrors) -> Self {
        Self::ValidationFailed(errors)
    }
}

impl From<LibraryError> for AppError {
    fn from(err: LibraryError) -> Self {
        let message = err.to_string();
        match err {
            LibraryError::BadRequest(_) => AppError::bad_request(message),
            LibraryError::NotFoundParent(id) => AppError::not_found_with(
                "author_not_found",
                vec![json!({ "authorId": id })],
                message,
            ),
            LibraryError::NotFoundResource { .. } => AppError::not_found(message),
            LibraryError::PartialNotFound { missing } => AppError::not_found_with(
                "partial_not_found",
                missing.iter().map(|id| json!({ "id": id })).collect(),
                message,
            ),
            LibraryError::ValidationFailed(errors) => AppError::validation(
                errors
                    .violations()
                    .iter()
                    .map(|v| json!({ "field": v.field, "message": v.message }))
                    .collect(),
                "One or more validation errors occurred",
            ),
            LibraryError::Store(StoreError::DuplicateId(id)) => {
                AppError::conflict(vec![json!({ "id": id })], message)
            }
            LibraryError::Store(err) => AppError::Internal(err.into()),
        }
    }
}
