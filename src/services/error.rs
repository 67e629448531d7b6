use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Listing {0} not found")]
    ListingNotFound(Uuid),

    #[error("Recommendation limit must be a positive integer (got {0})")]
    InvalidLimit(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::UserNotFound(_)
            | ServiceError::ListingNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::InvalidLimit(_) => StatusCode::BAD_REQUEST,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error.status_code() {
            StatusCode::NOT_FOUND => HttpError::not_found(error.to_string()),
            StatusCode::BAD_REQUEST => HttpError::bad_request(error.to_string()),
            _ => HttpError::server_error(error.to_string()),
        }
    }
}
