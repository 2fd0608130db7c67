use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    EntityNotFound(String),
    // 予約済みの部屋、重複した部屋番号、キャンセル済みの予約など
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Transaction failed: {0}")]
    TransactionError(#[source] sqlx::Error),
    #[error("Database operation failed: {0}")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("Invalid email or password")]
    UnauthenticatedError,
    #[error("Not authenticated")]
    UnauthorizedError,
    #[error("Not authorized")]
    ForbiddenOperation,
    #[error("{0}")]
    ConversionEntityError(String),
}

/// Stable, machine-readable classification sent to clients next to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Forbidden,
    Unauthenticated,
    Validation,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::EntityNotFound(_) => ErrorKind::NotFound,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::ConvertToUuidError(_) => ErrorKind::Validation,
            AppError::UnauthenticatedError | AppError::UnauthorizedError => {
                ErrorKind::Unauthenticated
            }
            AppError::ForbiddenOperation => ErrorKind::Forbidden,
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_)
            | AppError::ConversionEntityError(_) => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict | ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status_code = self.status_code();

        let body = if kind == ErrorKind::Internal {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
            json!({
                "message": "Server error",
                "kind": kind,
                "error": self.to_string(),
            })
        } else {
            json!({
                "message": self.to_string(),
                "kind": kind,
            })
        };

        (status_code, Json(body)).into_response()
    }
}

// 本文やパスパラメータを読めなかった場合も同じ形式のエラー本文で返す
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;
