//! Full-refresh account sync: fetch everything, replace the table, roll up two months.

use crate::crm::ZohoClient;
use crate::db::{AccountCreate, DbActorHandle};
use crate::error::DashboardError;
use crate::metrics::{CalendarMonth, DashboardPeriods};
use crate::session::Session;
use chrono::NaiveDate;
use tracing::{info, warn};

/// Replaces the local account mirror with the CRM's current contents.
///
/// Fails with [`DashboardError::AuthenticationMissing`] before touching the store when no token
/// is held. Returns the number of records synced.
pub async fn sync_accounts(
    session: &Session,
    crm: &ZohoClient,
    db: &DbActorHandle,
    today: NaiveDate,
) -> Result<usize, DashboardError> {
    let token = session
        .access_token()
        .ok_or(DashboardError::AuthenticationMissing)?;

    let records = crm.fetch_accounts(&token).await?;
    let rows: Vec<AccountCreate> = records.into_iter().map(AccountCreate::from).collect();
    let count = rows.len();

    let inserted = db.replace_accounts(rows).await?;
    if usize::try_from(inserted).ok() != Some(count) {
        warn!(count, inserted, "Inserted row count differs from fetched records");
    }

    refresh_monthly_metrics(db, today).await?;

    info!(count, "Account sync completed");
    Ok(count)
}

/// Recomputes the `monthly_metrics` rows for the current and the previous month.
///
/// Uses the same windows as the dashboard, so the previous month drops closed merchants.
pub async fn refresh_monthly_metrics(
    db: &DbActorHandle,
    today: NaiveDate,
) -> Result<(), DashboardError> {
    let periods = DashboardPeriods::for_date(today);
    let current = CalendarMonth::of(today);

    for (month, query) in [
        (current, periods.current),
        (current.previous(), periods.last_month),
    ] {
        let totals = db.aggregate(query).await?;
        db.upsert_monthly_metric(month, totals).await?;
        info!(
            period = %month,
            account_count = totals.account_count,
            total_volume = totals.total_volume,
            "Monthly metrics updated"
        );
    }
    Ok(())
}
