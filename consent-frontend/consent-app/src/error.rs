use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors are kept as strings so they stay `Clone` and can cross the
/// client/server boundary as JSON.
#[derive(Debug, Error, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum AppError {
    #[error("JSON {0}")]
    Json(String),
    #[error("Cookie value was not valid UTF-8 after decoding: {0}")]
    Encoding(String),
    #[error("Unable to store cookie: {0}")]
    CookieStore(String),
    #[error("Unable to navigate: {0}")]
    Navigation(String),
    #[error("Expected cookie {expected} but got {actual}")]
    WrongCookie { expected: String, actual: String },
    #[error("No browser window is available")]
    NoBrowser,
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value.to_string())
    }
}

impl From<std::str::Utf8Error> for AppError {
    fn from(value: std::str::Utf8Error) -> Self {
        Self::Encoding(value.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
