use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("not found")]
    NotFound,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                AskamaTemplateResponse::into_response(NotFoundTemplate),
            )
                .into_response(),
            AppError::Config(_) | AppError::Io(_) | AppError::Storage(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}

/// Failures of the key-value layer underneath the trip collection.
///
/// These never reach the web layer from the trip operations: the persistence
/// adapter logs them and falls back to an empty collection or a no-op write.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a trip draft cannot become a trip yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("pick at least one destination")]
    NoDestinations,
    #[error("give your trip a name")]
    EmptyName,
    #[error("pick a start date")]
    MissingStartDate,
    #[error("the end date can't be before the start date")]
    EndBeforeStart,
    #[error("the {field} date `{raw}` is not a date")]
    InvalidDate { field: &'static str, raw: String },
}
