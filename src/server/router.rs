use crate::config::{Config, ZohoConfig};
use crate::crm::{ZohoClient, ZohoOauth};
use crate::db::DbActorHandle;
use crate::error::DashboardError;
use crate::server::access_log::access_log;
use crate::server::routes::{api, auth, webhook};
use crate::session::Session;

use axum::{Router, middleware};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, services::ServeDir};

const USER_AGENT_VALUE: &str = concat!("crm-pulse/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct AppState {
    pub db: DbActorHandle,
    pub session: Session,
    pub oauth: Arc<ZohoOauth>,
    pub crm: Arc<ZohoClient>,
    pub zoho_cfg: Arc<ZohoConfig>,
    /// Shared outbound client for the token endpoint and the CRM API.
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(db: DbActorHandle, cfg: &Config) -> Result<Self, DashboardError> {
        let zoho_cfg = Arc::new(cfg.zoho.clone());
        let client = build_client(zoho_cfg.proxy.as_ref())?;

        Ok(Self {
            db,
            session: Session::new(),
            oauth: Arc::new(ZohoOauth::new(&zoho_cfg)),
            crm: Arc::new(ZohoClient::new(&zoho_cfg, client.clone())),
            zoho_cfg,
            client,
        })
    }
}

/// Redirects are never followed: the token endpoint must answer directly. Only connecting
/// is bounded; a slow CRM response is awaited.
fn build_client(proxy: Option<&url::Url>) -> Result<reqwest::Client, DashboardError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(USER_AGENT_VALUE)
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(10));

    if let Some(proxy_url) = proxy {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }

    Ok(builder.build()?)
}

/// Builds the full application: API routes plus the static dashboard shell from
/// `frontend_dir` (`GET /` serves its `index.html`).
///
/// CORS is open to any origin; preflights are answered before routing.
pub fn app_router(state: AppState, frontend_dir: &Path) -> Router {
    let frontend = ServeDir::new(frontend_dir).append_index_html_on_directories(true);

    Router::new()
        .merge(auth::router())
        .merge(api::router())
        .merge(webhook::router())
        .fallback_service(frontend)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
        .layer(CorsLayer::permissive())
}
