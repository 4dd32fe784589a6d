use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::services::templates::{ERROR_PAGE, render_template};

const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("File read error, {0}")]
    FileReadError(String),
    #[error("Database url parsing error")]
    DatabaseParsingError,
    #[error("Sqlx error: {0}")]
    SqlxError(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),
    #[error("{0}")]
    NotFoundError(String),
}

impl AppError {
    /// Status code and client-facing message for this error.
    ///
    /// Server errors only expose a generic message, the detail goes to the log.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::NotFoundError(e) => (StatusCode::NOT_FOUND, e.clone()),
            Self::FileReadError(_)
            | Self::DatabaseParsingError
            | Self::SqlxError(_)
            | Self::MigrateError(_)
            | Self::TemplateError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_SERVER_ERROR_MESSAGE.to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        if status.is_server_error() {
            error!("{self}");
        }

        let body = Json(json!({"error": error_message}));

        (status, body).into_response()
    }
}

/// [`AppError`] rendered as an HTML error page for the server-side rendered routes.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.0.status_and_message();

        if status.is_server_error() {
            error!("{}", self.0);
        }

        let context = json!({
            "status": status.as_u16(),
            "reason": status.canonical_reason().unwrap_or("Error"),
            "message": error_message,
        });

        match render_template(ERROR_PAGE, context) {
            Ok(page) => (status, Html(page)).into_response(),
            Err(e) => {
                error!("Failed to render error page, {e}");
                (status, error_message).into_response()
            }
        }
    }
}
