//! Error handling

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::info;

use crate::constants::{INTERNAL_ERROR_MESSAGE, MISSING_FIELDS_MESSAGE};

/// definitions for the brandgen application.
#[derive(Debug)]
pub enum GeneratorError {
    /// One of usage, dimension or subject was absent or empty
    MissingFields,
    /// No API key was configured for the named provider
    ProviderNotConfigured(String),
    /// The provider call failed or returned nothing usable
    Provider(String),
}

impl GeneratorError {
    /// The message shown to the caller. Only validation and configuration
    /// errors say anything specific.
    pub fn public_message(&self) -> String {
        match self {
            GeneratorError::MissingFields => MISSING_FIELDS_MESSAGE.to_string(),
            GeneratorError::ProviderNotConfigured(provider) => {
                format!("{provider} API Key not configured on server")
            }
            GeneratorError::Provider(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GeneratorError::MissingFields => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields => write!(f, "{MISSING_FIELDS_MESSAGE}"),
            Self::ProviderNotConfigured(provider) => {
                write!(f, "{provider} API Key not configured on server")
            }
            Self::Provider(message) => write!(f, "Image provider error: {message}"),
        }
    }
}

impl std::error::Error for GeneratorError {}

impl From<reqwest::Error> for GeneratorError {
    fn from(err: reqwest::Error) -> Self {
        GeneratorError::Provider(err.to_string())
    }
}

impl IntoResponse for GeneratorError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            GeneratorError::MissingFields => {
                info!("Rejected generate request with missing fields");
            }
            GeneratorError::ProviderNotConfigured(provider) => {
                tracing::error!("{provider} API key is not configured");
            }
            GeneratorError::Provider(message) => {
                tracing::error!("Error generating image: {}", message);
            }
        }
        let body = Json(json!({ "error": self.public_message() }));
        (self.status_code(), body).into_response()
    }
}
