//! Date-bucketed aggregates behind the dashboard tiles.
//!
//! - `period.rs`: calendar months and the three aggregate windows
//! - `summary.rs`: totals, percentage change and the dashboard JSON contract

mod period;
mod summary;

pub use period::{CLOSED_MERCHANT, CalendarMonth, DashboardPeriods, PeriodQuery};
pub use summary::{AccountCount, DashboardData, MetricSummary, PeriodTotals, percent_change};

use crate::db::DbActorHandle;
use crate::error::DashboardError;
use chrono::NaiveDate;
use tracing::debug;

/// Runs the three live aggregates for `today` and derives the percentage deltas.
///
/// Reads account rows directly; the `monthly_metrics` table is not consulted.
pub async fn dashboard_data(
    db: &DbActorHandle,
    today: NaiveDate,
) -> Result<DashboardData, DashboardError> {
    let periods = DashboardPeriods::for_date(today);

    let current = db.aggregate(periods.current).await?;
    let last_month = db.aggregate(periods.last_month).await?;
    let last_year = db.aggregate(periods.last_year).await?;

    debug!(
        current.count = current.account_count,
        last_month.count = last_month.account_count,
        last_year.count = last_year.account_count,
        "Dashboard aggregates computed"
    );

    Ok(DashboardData::from_totals(current, last_month, last_year))
}
