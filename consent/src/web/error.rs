use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use consent_app::error::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonError {
    pub error_message: String,
}

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Terms have not been agreed to")]
    TermsNotAgreed,
    #[error("Invalid terms agreement cookie: {0}")]
    App(#[from] AppError),
    #[error("IO Error {0}")]
    Io(#[from] std::io::Error),
}

impl WebError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            WebError::TermsNotAgreed | WebError::App(_) => StatusCode::BAD_REQUEST,
            WebError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.as_status_code();
        if status.is_server_error() {
            error!("error {self}");
        } else {
            warn!("rejected request {self}");
        }
        let error_message = format!("{self}");
        (status, Json(JsonError { error_message })).into_response()
    }
}
