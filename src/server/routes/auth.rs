use crate::error::DashboardError;
use crate::server::router::AppState;
use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use oauth2::TokenResponse;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{error, info};

const AUTH_SUCCESS_REDIRECT: &str = "/?auth=success";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/url", get(auth_url))
        .route("/auth/callback", get(auth_callback))
        .route("/test-callback", get(test_callback))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUrlResponse {
    pub auth_url: String,
    pub test_callback: String,
    pub expected_callback: String,
}

/// GET /auth/url
async fn auth_url(State(state): State<AppState>) -> Json<AuthUrlResponse> {
    let auth_url = state.oauth.authorize_url().to_string();
    info!(
        auth_url = %auth_url,
        client_id = %state.zoho_cfg.client_id,
        redirect_uri = %state.zoho_cfg.redirect_uri,
        "Generated authorization URL"
    );

    Json(AuthUrlResponse {
        auth_url,
        test_callback: state.zoho_cfg.test_callback_url().to_string(),
        expected_callback: state.zoho_cfg.redirect_uri.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthCallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// GET /auth/callback
///
/// Failures answer with a plain-text diagnostic; the browser lands here directly.
async fn auth_callback(
    State(state): State<AppState>,
    Query(query): Query<AuthCallbackQuery>,
) -> Response {
    info!(
        has_code = query.code.is_some(),
        error = query.error.as_deref().unwrap_or("<none>"),
        "OAuth callback received"
    );

    match process_callback(&state, query).await {
        Ok(()) => Redirect::to(AUTH_SUCCESS_REDIRECT).into_response(),
        Err(err) => {
            error!("OAuth callback failure: {err}");
            (err.status_code(), callback_failure_text(&err)).into_response()
        }
    }
}

async fn process_callback(
    state: &AppState,
    query: AuthCallbackQuery,
) -> Result<(), DashboardError> {
    if let Some(error) = query.error {
        return Err(DashboardError::Validation(format!("OAuth error: {error}")));
    }

    let code = query
        .code
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| {
            DashboardError::Validation(
                "Authorization code not provided. Check Zoho redirect URI settings.".to_string(),
            )
        })?;

    let token = state.oauth.exchange_code(&code, &state.client).await?;
    state.session.set_access_token(token.access_token().clone());
    info!("Access token obtained successfully");
    Ok(())
}

fn callback_failure_text(err: &DashboardError) -> String {
    match err {
        DashboardError::Oauth(e) => format!("Error obtaining access token: {e}"),
        other => other.to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct TestCallbackResponse {
    pub message: &'static str,
    pub query: BTreeMap<String, String>,
}

/// GET /test-callback
async fn test_callback(
    Query(query): Query<BTreeMap<String, String>>,
) -> Json<TestCallbackResponse> {
    info!(?query, "Test callback received");
    Json(TestCallbackResponse {
        message: "Callback working!",
        query,
    })
}
