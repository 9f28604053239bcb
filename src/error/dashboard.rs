use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error as ThisError;

use super::oauth::OauthError;

#[derive(Debug, ThisError)]
pub enum DashboardError {
    #[error("Not authenticated. Please authorize first.")]
    AuthenticationMissing,

    #[error("CRM request failed with status {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("CRM request error: {0}")]
    UpstreamRequest(#[from] reqwest::Error),

    #[error("CRM payload error: {0}")]
    UpstreamPayload(#[from] serde_json::Error),

    #[error(transparent)]
    Oauth(#[from] OauthError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("{0}")]
    Validation(String),
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::AuthenticationMissing => StatusCode::UNAUTHORIZED,
            DashboardError::Validation(_) => StatusCode::BAD_REQUEST,
            DashboardError::UpstreamStatus { .. }
            | DashboardError::UpstreamRequest(_)
            | DashboardError::UpstreamPayload(_)
            | DashboardError::Oauth(_)
            | DashboardError::DatabaseError(_)
            | DashboardError::RactorError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ApiErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Error payload shared by every JSON endpoint.
///
/// The underlying message is exposed verbatim; this is an internal tool.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}
