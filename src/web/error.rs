use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::scraper::ScrapeError;
use crate::storage::StorageError;
use crate::telegram::TelegramError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(..) | StorageError::SettingsMissing => {
                AppError::NotFound(err.to_string())
            }
        }
    }
}

impl From<ScrapeError> for AppError {
    fn from(err: ScrapeError) -> Self {
        match err {
            ScrapeError::PlatformNotFound(_) => AppError::NotFound(err.to_string()),
            ScrapeError::Source(_) => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl From<TelegramError> for AppError {
    fn from(err: TelegramError) -> Self {
        match err {
            TelegramError::NotFound(..) => AppError::NotFound(err.to_string()),
            TelegramError::Storage(e) => e.into(),
            _ => AppError::InternalServerError(err.to_string()),
        }
    }
}
