use crate::server::router::AppState;
use crate::utils::logging::with_pretty_json_debug;
use axum::{Router, body::Bytes, http::StatusCode, response::IntoResponse, routing::post};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

pub fn router() -> Router<AppState> {
    Router::new().route("/webhook/zoho", post(zoho_webhook))
}

/// Notification body as configured in the CRM workflow rule.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl WebhookPayload {
    pub fn is_account_change(&self) -> bool {
        matches!(
            self.event.as_deref(),
            Some("accounts.create" | "accounts.update")
        )
    }
}

/// POST /webhook/zoho
///
/// Acknowledge-only: the payload is logged and nothing is written. A later sync picks the
/// change up.
async fn zoho_webhook(body: Bytes) -> impl IntoResponse {
    let payload: WebhookPayload = serde_json::from_slice(&body).unwrap_or_default();

    info!(
        event = payload.event.as_deref().unwrap_or("<none>"),
        bytes = body.len(),
        "Webhook received"
    );
    with_pretty_json_debug(&payload, |json| {
        debug!("Webhook payload:\n{json}");
    });

    if payload.is_account_change() {
        info!("Account updated via webhook");
    }

    (StatusCode::OK, "OK")
}
