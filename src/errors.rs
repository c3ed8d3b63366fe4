use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
///
/// Every variant renders as `{"success": false, "error": ...}`.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Invalid input that could not be coerced.
    BadRequest(String),
    /// Resource not found error.
    NotFound(String),
    /// A factor combination has no entry in a recommendation table.
    LookupMiss(String),
    /// The weather provider credential is not configured.
    MissingApiKey,
    /// Outbound call to the weather provider exceeded its deadline.
    GatewayTimeout(String),
    /// Transport failure or non-2xx answer from the weather provider.
    GatewayFailure(String),
    /// Provider answered, but the payload could not be projected.
    InvalidPayload(String),
    /// Internal server error.
    InternalError(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::LookupMiss(msg) => write!(f, "No recommendation for {}", msg),
            AppError::MissingApiKey => write!(f, "API key not configured"),
            AppError::GatewayTimeout(msg) => write!(f, "Weather provider timed out: {}", msg),
            AppError::GatewayFailure(msg) => write!(f, "Weather provider error: {}", msg),
            AppError::InvalidPayload(msg) => write!(f, "Invalid weather payload: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::LookupMiss(_)
            | AppError::MissingApiKey
            | AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::GatewayTimeout(_) => StatusCode::REQUEST_TIMEOUT,
            AppError::GatewayFailure(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::WithContext { source, .. } => source.status(),
        }
    }

    /// Message shown to API clients.
    pub fn public_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::LookupMiss(msg) => format!("No recommendation available for {}", msg),
            AppError::MissingApiKey => {
                "API key not configured. Please set OPENWEATHER_API_KEY in .env file".to_string()
            }
            AppError::GatewayTimeout(_) => "Connection timed out. Please try again.".to_string(),
            AppError::GatewayFailure(msg) => {
                format!("Failed to connect to weather provider: {}", msg)
            }
            AppError::InvalidPayload(msg) => format!("Error processing weather data: {}", msg),
            AppError::InternalError(_) => "Internal server error".to_string(),
            AppError::WithContext { source, .. } => source.public_message(),
        }
    }
}

impl IntoResponse for AppError {
    /// Maps each error variant to an HTTP status code and JSON body.
    /// Logs errors based on their severity.
    fn into_response(self) -> Response {
        match &self {
            AppError::LookupMiss(msg) => {
                tracing::error!("Recommendation table miss: {}", msg);
            }
            AppError::GatewayTimeout(msg) => {
                tracing::warn!("Weather provider timeout: {}", msg);
            }
            AppError::GatewayFailure(msg) | AppError::InvalidPayload(msg) => {
                tracing::error!("Weather provider error: {}", msg);
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
            }
            AppError::WithContext { source, context } => {
                // Log full context chain for debugging
                tracing::error!("Error with context: {} -> {}", context, source);
            }
            _ => {}
        }

        let body = Json(json!({
            "success": false,
            "error": self.public_message(),
        }));

        (self.status(), body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    /// Classifies a `reqwest::Error` into timeout, decode or transport failure.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::GatewayTimeout(err.to_string())
        } else if err.is_decode() {
            AppError::InvalidPayload(err.to_string())
        } else {
            AppError::GatewayFailure(err.to_string())
        }
    }
}

impl From<QueryRejection> for AppError {
    /// Malformed query strings answer with the JSON error envelope.
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e.into()),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e.into()),
            context: f(),
        })
    }
}
