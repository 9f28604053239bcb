//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `accounts` table (mirror of CRM accounts, replaced wholesale on every sync)
/// - `monthly_metrics` table (one (year, month) per row, upserted by sync)
pub const SQLITE_INIT: &str = r"
-- ---------------------------------------------------------------------------
-- Synced CRM accounts
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY NOT NULL,
    zoho_id TEXT NOT NULL UNIQUE,
    account_name TEXT NOT NULL DEFAULT '',
    deal_signed_date TEXT NOT NULL DEFAULT '', -- as sent by the CRM, ISO-ish
    monthly_card_volume REAL NOT NULL DEFAULT 0,
    lead_status TEXT NOT NULL DEFAULT '',
    created_date TEXT NOT NULL DEFAULT '', -- CRM Created_Time
    modified_date TEXT NOT NULL DEFAULT '', -- CRM Modified_Time
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_accounts_deal_signed_date ON accounts(deal_signed_date);

-- ---------------------------------------------------------------------------
-- Per-month rollups written as a side effect of sync
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS monthly_metrics (
    id INTEGER PRIMARY KEY NOT NULL,
    year INTEGER NOT NULL,
    month INTEGER NOT NULL,
    account_count INTEGER NOT NULL DEFAULT 0,
    total_volume REAL NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL, -- RFC3339
    UNIQUE(year, month)
);
";
