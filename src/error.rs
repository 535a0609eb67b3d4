use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug)]
pub enum AppError {
    /// One message per rejected field.
    Validation(Vec<String>),
    DuplicateKey { email: String },
    NotFound(String),
    BadRequest(String),
    ParseForm(String),
    PayloadTooLarge(String),
    DeadlineExceeded,
}

/// Uniform failure body. `code` mirrors the HTTP status.
#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorEnvelope {
    pub message: String,
    pub code: u16,
}

impl AppError {
    /// Failure to decode query parameters or path segments.
    pub fn parse_form(err: impl std::fmt::Display) -> Self {
        AppError::ParseForm(format!("Unable to parse request: {err}"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
            AppError::Validation(_)
            | AppError::DuplicateKey { .. }
            | AppError::BadRequest(_)
            | AppError::ParseForm(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::Validation(problems) => problems.join("; "),
            AppError::DuplicateKey { email } => format!("Email {email} is already taken"),
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::ParseForm(msg)
            | AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::DeadlineExceeded => "Request deadline exceeded".to_string(),
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            message: self.message(),
            code: self.status().as_u16(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(_) => write!(f, "Validation Error: {}", self.message()),
            AppError::DuplicateKey { .. } => write!(f, "Duplicate Key: {}", self.message()),
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::ParseForm(msg) => write!(f, "Parse Form: {msg}"),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload Too Large: {msg}"),
            AppError::DeadlineExceeded => write!(f, "Deadline Exceeded"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let envelope = self.envelope();
        if matches!(self, AppError::DeadlineExceeded) {
            tracing::error!("Store deadline exceeded");
        } else {
            tracing::debug!(code = envelope.code, "Request failed: {self}");
        }
        (self.status(), axum::Json(envelope)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::warn!("Database error: {err}");
        AppError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::parse_form(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::parse_form(rejection.body_text())
    }
}
