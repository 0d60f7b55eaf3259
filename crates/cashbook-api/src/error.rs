//! Error types for cashbook-api

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use cashbook_core::{CoreError, ErrorCode, ErrorDetails, ErrorSeverity};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Bad request: {message}")]
    BadRequest { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest { message: message.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(e) => match e.code() {
                ErrorCode::InvalidDate | ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
                ErrorCode::AccountNotFound | ErrorCode::TransactionNotFound => StatusCode::NOT_FOUND,
                ErrorCode::ReadOnlyField | ErrorCode::RangeReadOnly | ErrorCode::DuplicateEntry => {
                    StatusCode::CONFLICT
                }
                ErrorCode::StorageError | ErrorCode::InternalError => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    pub fn to_details(&self) -> ErrorDetails {
        match self {
            ApiError::Core(e) => e.to_details(),
            ApiError::BadRequest { .. } => {
                ErrorDetails::new(ErrorCode::ValidationError, self.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = self.to_details();

        match self {
            ApiError::Core(ref e) if e.severity() >= ErrorSeverity::Error => {
                log::error!(target: "cashbook::api", "{} {}", status, details);
            }
            _ => log::debug!(target: "cashbook::api", "{} {}", status, details.message),
        }

        (status, Json(details)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
