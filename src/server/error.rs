//! Mapping of handler failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepoError;
use crate::models::InvalidItemId;

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed request: unparseable form, JSON or identifier.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl From<InvalidItemId> for AppError {
    fn from(e: InvalidItemId) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Repo(RepoError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Repo(RepoError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Repo(_) | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            (status, "Something went wrong, please try again").into_response()
        } else {
            tracing::debug!("Rejected request ({}): {}", status, self);
            (status, self.to_string()).into_response()
        }
    }
}
