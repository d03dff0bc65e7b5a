use actix_web::{HttpResponse, ResponseError};
use askdb_llm_sdk::error::LlmError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Translation error: {0}")]
    Translation(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Wire shape for every error body: `{"error": "..."}`
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = ErrorResponse {
            error: self.to_string(),
        };

        // Client mistakes, missing uploads, unreadable databases, and
        // upstream translation failures all surface as 400 with an error
        // string; only genuine server faults get a 500.
        match self {
            AppError::NotFound(_)
            | AppError::InvalidRequest(_)
            | AppError::Database(_)
            | AppError::Translation(_)
            | AppError::Io(_) => HttpResponse::BadRequest().json(body),
            AppError::Config(_) | AppError::Internal(_) => {
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
