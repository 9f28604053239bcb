use crate::dashboard::DashboardTiles;
use crate::db::DbMonthlyMetric;
use crate::error::DashboardError;
use crate::metrics::{self, DashboardData};
use crate::server::router::AppState;
use crate::sync;
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::error;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sync-accounts", post(sync_accounts))
        .route("/api/dashboard-data", get(dashboard_data))
        .route("/api/dashboard-tiles", get(dashboard_tiles))
        .route("/api/monthly-metrics", get(monthly_metrics))
}

/// Calendar date that defines "this month" for aggregation.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
}

/// POST /api/sync-accounts
async fn sync_accounts(
    State(state): State<AppState>,
) -> Result<Json<SyncResponse>, DashboardError> {
    let count = sync::sync_accounts(&state.session, &state.crm, &state.db, today())
        .await
        .inspect_err(|e| error!("Error syncing accounts: {e}"))?;

    Ok(Json(SyncResponse {
        success: true,
        message: format!("Synced {count} accounts"),
        count,
    }))
}

/// GET /api/dashboard-data
async fn dashboard_data(
    State(state): State<AppState>,
) -> Result<Json<DashboardData>, DashboardError> {
    let data = metrics::dashboard_data(&state.db, today()).await?;
    Ok(Json(data))
}

/// GET /api/dashboard-tiles
async fn dashboard_tiles(
    State(state): State<AppState>,
) -> Result<Json<DashboardTiles>, DashboardError> {
    let data = metrics::dashboard_data(&state.db, today()).await?;
    Ok(Json(DashboardTiles::from_data(&data)))
}

/// GET /api/monthly-metrics
async fn monthly_metrics(
    State(state): State<AppState>,
) -> Result<Json<Vec<DbMonthlyMetric>>, DashboardError> {
    Ok(Json(state.db.list_monthly_metrics().await?))
}
