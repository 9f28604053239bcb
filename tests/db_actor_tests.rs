use crm_pulse::DashboardError;
use crm_pulse::db::AccountCreate;
use crm_pulse::metrics::{CLOSED_MERCHANT, CalendarMonth, PeriodQuery, PeriodTotals};
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_sqlite_path(prefix: &str) -> std::path::PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "crm-pulse-{prefix}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    temp_path
}

async fn spawn_db(prefix: &str) -> crm_pulse::db::DbActorHandle {
    let temp_path = unique_sqlite_path(prefix);
    let database_url = format!("sqlite:{}", temp_path.display());
    crm_pulse::db::spawn(&database_url)
        .await
        .expect("spawn db actor")
}

fn account(zoho_id: &str, deal_signed: &str, volume: f64, status: &str) -> AccountCreate {
    AccountCreate {
        zoho_id: zoho_id.to_string(),
        account_name: format!("Account {zoho_id}"),
        deal_signed_date: deal_signed.to_string(),
        monthly_card_volume: volume,
        lead_status: status.to_string(),
        created_date: "2024-01-01T09:00:00+00:00".to_string(),
        modified_date: "2024-01-02T09:00:00+00:00".to_string(),
    }
}

#[tokio::test]
async fn replace_accounts_discards_every_previous_row() {
    let db = spawn_db("replace").await;

    let first = vec![
        account("1", "2024-03-01", 10.0, "Active"),
        account("2", "2024-03-02", 20.0, "Active"),
        account("3", "2024-03-03", 30.0, "Active"),
    ];
    assert_eq!(db.replace_accounts(first).await.unwrap(), 3);

    let second = vec![
        account("3", "2024-03-03", 35.0, "Active"),
        account("4", "2024-03-04", 40.0, "Active"),
    ];
    assert_eq!(db.replace_accounts(second).await.unwrap(), 2);

    let rows = db.list_accounts().await.unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.zoho_id.as_str()).collect();
    assert_eq!(ids, vec!["3", "4"]);
    assert!((rows[0].monthly_card_volume - 35.0).abs() < f64::EPSILON);
    assert_eq!(rows[0].account_name, "Account 3");
}

#[tokio::test]
async fn replace_with_empty_batch_clears_the_table() {
    let db = spawn_db("replace-empty").await;

    db.replace_accounts(vec![account("1", "2024-03-01", 10.0, "Active")])
        .await
        .unwrap();
    assert_eq!(db.replace_accounts(Vec::new()).await.unwrap(), 0);
    assert!(db.list_accounts().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_zoho_id_rolls_back_and_keeps_previous_rows() {
    let db = spawn_db("replace-dup").await;

    db.replace_accounts(vec![account("keep", "2024-03-01", 10.0, "Active")])
        .await
        .unwrap();

    let err = db
        .replace_accounts(vec![
            account("dup", "2024-03-01", 1.0, "Active"),
            account("dup", "2024-03-02", 2.0, "Active"),
        ])
        .await
        .expect_err("unique constraint should reject the batch");
    assert!(
        matches!(err, DashboardError::DatabaseError(_)),
        "unexpected error kind: {err}"
    );

    let rows = db.list_accounts().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].zoho_id, "keep");
}

#[tokio::test]
async fn aggregates_follow_prefix_windows_and_closed_merchant_rule() {
    let db = spawn_db("aggregate").await;

    db.replace_accounts(vec![
        account("a", "2024-03-05", 100.0, "Active"),
        account("b", "2024-03-20", 50.0, CLOSED_MERCHANT),
        account("c", "2024-02-10", 40.0, "Active"),
        account("d", "2024-02-11", 999.0, CLOSED_MERCHANT),
        account("e", "2023-06-15", 20.0, "Active"),
        account("f", "2023-07-15", 500.0, CLOSED_MERCHANT),
        account("g", "", 70.0, "Active"),
        // Any text starting with the prefix matches.
        account("h", "2024-03-31T23:59:59", 5.0, "Prospect"),
    ])
    .await
    .unwrap();

    let march = CalendarMonth {
        year: 2024,
        month: 3,
    };
    let february = march.previous();

    let current = db.aggregate(PeriodQuery::CurrentMonth(march)).await.unwrap();
    assert_eq!(current.account_count, 3, "closed merchants count this month");
    assert!((current.total_volume - 155.0).abs() < 1e-9);

    let last_month = db
        .aggregate(PeriodQuery::PreviousMonth(february))
        .await
        .unwrap();
    assert_eq!(last_month.account_count, 1);
    assert!((last_month.total_volume - 40.0).abs() < 1e-9);

    let last_year = db.aggregate(PeriodQuery::PreviousYear(2023)).await.unwrap();
    assert_eq!(last_year.account_count, 1);
    assert!((last_year.total_volume - 20.0).abs() < 1e-9);

    let empty = db
        .aggregate(PeriodQuery::PreviousYear(2019))
        .await
        .unwrap();
    assert_eq!(empty, PeriodTotals::default());
}

#[tokio::test]
async fn monthly_metric_upsert_updates_in_place() {
    let db = spawn_db("monthly").await;
    let march = CalendarMonth {
        year: 2024,
        month: 3,
    };
    let april = CalendarMonth {
        year: 2024,
        month: 4,
    };

    let id = db
        .upsert_monthly_metric(
            march,
            PeriodTotals {
                account_count: 2,
                total_volume: 30.0,
            },
        )
        .await
        .unwrap();
    assert!(id > 0);

    let same_id = db
        .upsert_monthly_metric(
            march,
            PeriodTotals {
                account_count: 5,
                total_volume: 75.5,
            },
        )
        .await
        .unwrap();
    assert_eq!(id, same_id);

    db.upsert_monthly_metric(april, PeriodTotals::default())
        .await
        .unwrap();

    let rows = db.list_monthly_metrics().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].year, rows[0].month), (2024, 3));
    assert_eq!(rows[0].account_count, 5);
    assert!((rows[0].total_volume - 75.5).abs() < 1e-9);
    assert!(rows[0].updated_at >= rows[0].created_at);
    assert_eq!((rows[1].year, rows[1].month), (2024, 4));
    assert_eq!(rows[1].account_count, 0);
}

#[tokio::test]
async fn monthly_rollup_covers_current_and_previous_month_across_new_year() {
    let db = spawn_db("rollup").await;

    db.replace_accounts(vec![
        account("jan", "2026-01-04", 10.0, "Active"),
        account("jan-closed", "2026-01-05", 5.0, CLOSED_MERCHANT),
        account("dec", "2025-12-20", 7.0, "Active"),
        account("dec-closed", "2025-12-21", 100.0, CLOSED_MERCHANT),
    ])
    .await
    .unwrap();

    let today = chrono::NaiveDate::from_ymd_opt(2026, 1, 10).expect("valid date");
    crm_pulse::sync::refresh_monthly_metrics(&db, today)
        .await
        .unwrap();

    let rows = db.list_monthly_metrics().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].year, rows[0].month), (2025, 12));
    assert_eq!(rows[0].account_count, 1);
    assert!((rows[0].total_volume - 7.0).abs() < 1e-9);
    assert_eq!((rows[1].year, rows[1].month), (2026, 1));
    assert_eq!(rows[1].account_count, 2);
    assert!((rows[1].total_volume - 15.0).abs() < 1e-9);
}
