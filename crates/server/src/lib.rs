//! Dictionary Server
//!
//! HTTP endpoints for word translation, history and statistics.

pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use metrics::{init_metrics, record_request, record_translation};
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use bangla_dict_resolver::ResolveError;

/// Server errors
///
/// Client-facing messages are fixed; the underlying cause is only logged.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Body or query the extractor could not accept
    #[error("Rejected request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("History unavailable: {0}")]
    History(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Rejected { status, .. } => *status,
            ServerError::Translation(_) | ServerError::History(_) | ServerError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn detail(&self) -> String {
        match self {
            ServerError::InvalidRequest(msg) | ServerError::Rejected { message: msg, .. } => {
                msg.clone()
            }
            ServerError::Translation(_) => "Translation service temporarily unavailable".to_string(),
            ServerError::History(_) => "Unable to fetch translations".to_string(),
            ServerError::Persistence(_) => "Internal server error".to_string(),
        }
    }
}

impl From<ResolveError> for ServerError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::EmptyWord => {
                ServerError::InvalidRequest(ResolveError::EmptyWord.to_string())
            }
            ResolveError::Persistence(e) => ServerError::Translation(e.to_string()),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for ServerError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        ServerError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<axum::extract::rejection::QueryRejection> for ServerError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        ServerError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        err.status()
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(serde_json::json!({ "detail": self.detail() }))).into_response()
    }
}
