use crate::db::models::{AccountCreate, DbAccount, DbMonthlyMetric};
use crate::db::schema::SQLITE_INIT;
use crate::error::DashboardError;
use crate::metrics::{CalendarMonth, PeriodQuery, PeriodTotals};
use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

const AGGREGATE_ALL: &str = r"
SELECT COUNT(*) AS account_count, COALESCE(SUM(monthly_card_volume), 0.0) AS total_volume
FROM accounts
WHERE deal_signed_date LIKE ?
";

const AGGREGATE_EXCLUDING_CLOSED: &str = r"
SELECT COUNT(*) AS account_count, COALESCE(SUM(monthly_card_volume), 0.0) AS total_volume
FROM accounts
WHERE deal_signed_date LIKE ?
  AND lead_status != ?
";

#[derive(Debug)]
pub enum DbActorMessage {
    /// Delete every account row and insert the given ones, in one transaction.
    ReplaceAccounts(Vec<AccountCreate>, RpcReplyPort<Result<u64, DashboardError>>),

    /// Count and sum accounts in one aggregate window.
    Aggregate(PeriodQuery, RpcReplyPort<Result<PeriodTotals, DashboardError>>),

    /// Insert or update the rollup for one month and return its id.
    UpsertMonthlyMetric(
        CalendarMonth,
        PeriodTotals,
        RpcReplyPort<Result<i64, DashboardError>>,
    ),

    /// List every monthly rollup ordered by (year, month).
    ListMonthlyMetrics(RpcReplyPort<Result<Vec<DbMonthlyMetric>, DashboardError>>),

    /// List every account row ordered by id.
    ListAccounts(RpcReplyPort<Result<Vec<DbAccount>, DashboardError>>),
}

/// Cloneable handle to the database actor.
///
/// The actor handles one message at a time, so store access is serialized.
#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn replace_accounts(
        &self,
        accounts: Vec<AccountCreate>,
    ) -> Result<u64, DashboardError> {
        ractor::call!(self.actor, DbActorMessage::ReplaceAccounts, accounts).map_err(|e| {
            DashboardError::RactorError(format!("DbActor ReplaceAccounts RPC failed: {e}"))
        })?
    }

    pub async fn aggregate(&self, query: PeriodQuery) -> Result<PeriodTotals, DashboardError> {
        ractor::call!(self.actor, DbActorMessage::Aggregate, query)
            .map_err(|e| DashboardError::RactorError(format!("DbActor Aggregate RPC failed: {e}")))?
    }

    pub async fn upsert_monthly_metric(
        &self,
        month: CalendarMonth,
        totals: PeriodTotals,
    ) -> Result<i64, DashboardError> {
        ractor::call!(self.actor, DbActorMessage::UpsertMonthlyMetric, month, totals).map_err(
            |e| DashboardError::RactorError(format!("DbActor UpsertMonthlyMetric RPC failed: {e}")),
        )?
    }

    pub async fn list_monthly_metrics(&self) -> Result<Vec<DbMonthlyMetric>, DashboardError> {
        ractor::call!(self.actor, DbActorMessage::ListMonthlyMetrics).map_err(|e| {
            DashboardError::RactorError(format!("DbActor ListMonthlyMetrics RPC failed: {e}"))
        })?
    }

    pub async fn list_accounts(&self) -> Result<Vec<DbAccount>, DashboardError> {
        ractor::call!(self.actor, DbActorMessage::ListAccounts).map_err(|e| {
            DashboardError::RactorError(format!("DbActor ListAccounts RPC failed: {e}"))
        })?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::ReplaceAccounts(accounts, reply) => {
                let res = self.replace_accounts(&state.pool, accounts).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Aggregate(query, reply) => {
                let res = self.aggregate(&state.pool, query).await;
                let _ = reply.send(res);
            }
            DbActorMessage::UpsertMonthlyMetric(month, totals, reply) => {
                let res = self.upsert_monthly_metric(&state.pool, month, totals).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListMonthlyMetrics(reply) => {
                let res = self.list_monthly_metrics(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListAccounts(reply) => {
                let res = self.list_accounts(&state.pool).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn replace_accounts(
        &self,
        pool: &SqlitePool,
        accounts: Vec<AccountCreate>,
    ) -> Result<u64, DashboardError> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM accounts")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut inserted = 0u64;
        for a in accounts {
            inserted += sqlx::query(
                r"
            INSERT INTO accounts (
                zoho_id, account_name, deal_signed_date, monthly_card_volume, lead_status,
                created_date, modified_date, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
            )
            .bind(a.zoho_id)
            .bind(a.account_name)
            .bind(a.deal_signed_date)
            .bind(a.monthly_card_volume)
            .bind(a.lead_status)
            .bind(a.created_date)
            .bind(a.modified_date)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;
        debug!(deleted, inserted, "Accounts table replaced");
        Ok(inserted)
    }

    async fn aggregate(
        &self,
        pool: &SqlitePool,
        query: PeriodQuery,
    ) -> Result<PeriodTotals, DashboardError> {
        let pattern = format!("{}%", query.date_prefix());

        let totals = if query.excludes_closed_merchant() {
            sqlx::query_as::<_, PeriodTotals>(AGGREGATE_EXCLUDING_CLOSED)
                .bind(pattern)
                .bind(crate::metrics::CLOSED_MERCHANT)
                .fetch_one(pool)
                .await?
        } else {
            sqlx::query_as::<_, PeriodTotals>(AGGREGATE_ALL)
                .bind(pattern)
                .fetch_one(pool)
                .await?
        };

        Ok(totals)
    }

    async fn upsert_monthly_metric(
        &self,
        pool: &SqlitePool,
        month: CalendarMonth,
        totals: PeriodTotals,
    ) -> Result<i64, DashboardError> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r"
        INSERT INTO monthly_metrics (year, month, account_count, total_volume, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(year, month) DO UPDATE SET
            account_count = excluded.account_count,
            total_volume = excluded.total_volume,
            updated_at = excluded.updated_at
        RETURNING id
        ",
        )
        .bind(month.year)
        .bind(month.month)
        .bind(totals.account_count)
        .bind(totals.total_volume)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    async fn list_monthly_metrics(
        &self,
        pool: &SqlitePool,
    ) -> Result<Vec<DbMonthlyMetric>, DashboardError> {
        let rows = sqlx::query_as::<_, DbMonthlyMetric>(
            r"
        SELECT id, year, month, account_count, total_volume, created_at, updated_at
        FROM monthly_metrics
        ORDER BY year, month
        ",
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn list_accounts(&self, pool: &SqlitePool) -> Result<Vec<DbAccount>, DashboardError> {
        let rows = sqlx::query_as::<_, DbAccount>(
            r"
        SELECT id, zoho_id, account_name, deal_signed_date, monthly_card_volume, lead_status,
               created_date, modified_date, created_at, updated_at
        FROM accounts
        ORDER BY id
        ",
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}

/// Spawn the database actor and return a cloneable handle.
///
/// The actor is unnamed so several stores can live in one process (tests do this).
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, DashboardError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| DashboardError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), DashboardError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
